use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Deref, Range};
use std::rc::Rc;
use std::sync::Arc;

use ecow::EcoString;

use crate::SyntaxKind;

/// A node in the untyped syntax tree.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct SyntaxNode(Repr);

/// The three internal representations.
#[derive(Clone, Eq, PartialEq, Hash)]
enum Repr {
    /// A leaf node.
    Leaf(LeafNode),
    /// A reference-counted inner node.
    Inner(Arc<InnerNode>),
    /// An error node.
    Error(Arc<ErrorNode>),
}

impl SyntaxNode {
    /// Create a new leaf node.
    pub fn leaf(kind: SyntaxKind, text: impl Into<EcoString>) -> Self {
        Self(Repr::Leaf(LeafNode {
            kind,
            text: text.into(),
        }))
    }

    /// Create a new inner node with children.
    pub fn inner(kind: SyntaxKind, children: Vec<SyntaxNode>) -> Self {
        let len = children.iter().map(SyntaxNode::len).sum();
        let erroneous = children.iter().any(SyntaxNode::erroneous);
        Self(Repr::Inner(Arc::new(InnerNode {
            kind,
            len,
            erroneous,
            children,
        })))
    }

    /// Create a new error node. Zero-length error nodes mark missing syntax.
    pub fn error(message: impl Into<EcoString>, text: impl Into<EcoString>) -> Self {
        Self(Repr::Error(Arc::new(ErrorNode {
            message: message.into(),
            text: text.into(),
        })))
    }

    /// The type of the node.
    pub fn kind(&self) -> SyntaxKind {
        match &self.0 {
            Repr::Leaf(leaf) => leaf.kind,
            Repr::Inner(inner) => inner.kind,
            Repr::Error(_) => SyntaxKind::Error,
        }
    }

    /// Return `true` if the length is 0.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The byte length of the node in the source text.
    pub fn len(&self) -> usize {
        match &self.0 {
            Repr::Leaf(leaf) => leaf.text.len(),
            Repr::Inner(inner) => inner.len,
            Repr::Error(node) => node.text.len(),
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        !matches!(self.0, Repr::Inner(_))
    }

    /// The text of the node if it is a leaf or error node.
    ///
    /// Returns the empty string if this is an inner node.
    pub fn text(&self) -> &EcoString {
        static EMPTY: EcoString = EcoString::new();
        match &self.0 {
            Repr::Leaf(leaf) => &leaf.text,
            Repr::Inner(_) => &EMPTY,
            Repr::Error(node) => &node.text,
        }
    }

    /// Extract the text from the node.
    ///
    /// Builds the string if this is an inner node.
    pub fn into_text(self) -> EcoString {
        match self.0 {
            Repr::Leaf(leaf) => leaf.text,
            Repr::Inner(inner) => inner
                .children
                .iter()
                .cloned()
                .map(Self::into_text)
                .collect(),
            Repr::Error(node) => node.text.clone(),
        }
    }

    /// The node's children.
    pub fn children(&self) -> std::slice::Iter<'_, SyntaxNode> {
        match &self.0 {
            Repr::Leaf(_) | Repr::Error(_) => [].iter(),
            Repr::Inner(inner) => inner.children.iter(),
        }
    }

    /// Whether the node or its children contain an error.
    pub fn erroneous(&self) -> bool {
        match &self.0 {
            Repr::Leaf(_) => false,
            Repr::Inner(inner) => inner.erroneous,
            Repr::Error(_) => true,
        }
    }

    /// The message of an error node.
    pub fn error_message(&self) -> Option<&EcoString> {
        match &self.0 {
            Repr::Error(node) => Some(&node.message),
            _ => None,
        }
    }

    /// The error messages of this node and its descendants.
    pub fn errors(&self) -> Vec<EcoString> {
        if !self.erroneous() {
            return vec![];
        }
        match &self.0 {
            Repr::Error(node) => vec![node.message.clone()],
            _ => self
                .children()
                .filter(|node| node.erroneous())
                .flat_map(|node| node.errors())
                .collect(),
        }
    }
}

impl Debug for SyntaxNode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.0 {
            Repr::Leaf(leaf) => write!(f, "{:?}: {:?}", leaf.kind, leaf.text),
            Repr::Error(node) => write!(f, "Error: {:?} ({})", node.text, node.message),
            Repr::Inner(inner) => {
                write!(f, "{:?}: {}", inner.kind, inner.len)?;
                if !inner.children.is_empty() {
                    f.write_str(" ")?;
                    f.debug_list().entries(&inner.children).finish()?;
                }
                Ok(())
            }
        }
    }
}

impl Display for SyntaxNode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.0 {
            Repr::Inner(inner) => inner
                .children
                .iter()
                .try_for_each(|child| Display::fmt(child, f)),
            _ => f.write_str(self.text()),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash)]
struct LeafNode {
    kind: SyntaxKind,
    text: EcoString,
}

#[derive(Clone, Eq, PartialEq, Hash)]
struct InnerNode {
    kind: SyntaxKind,
    len: usize,
    erroneous: bool,
    children: Vec<SyntaxNode>,
}

#[derive(Clone, Eq, PartialEq, Hash)]
struct ErrorNode {
    message: EcoString,
    text: EcoString,
}

/// A syntax node in a context.
///
/// Knows its exact offset in the file and provides access to its
/// children, parent and siblings.
///
/// **Note that all sibling accessors skip over trivia!**
#[derive(Clone)]
pub struct LinkedNode<'a> {
    /// The underlying syntax node.
    node: &'a SyntaxNode,
    /// The parent of this node.
    parent: Option<Rc<Self>>,
    /// The index of this node in its parent's children array.
    index: usize,
    /// This node's byte offset in the source file.
    offset: usize,
}

impl<'a> LinkedNode<'a> {
    /// Start a new traversal at a root node.
    pub fn new(root: &'a SyntaxNode) -> Self {
        Self {
            node: root,
            parent: None,
            index: 0,
            offset: 0,
        }
    }

    /// Get the contained syntax node.
    pub fn get(&self) -> &'a SyntaxNode {
        self.node
    }

    /// The index of this node in its parent's children list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The absolute byte offset of this node in the source file.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The byte range of this node in the source file.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.node.len()
    }

    /// The byte offset just past this node.
    pub fn end(&self) -> usize {
        self.offset + self.node.len()
    }

    /// An iterator over this node's children.
    pub fn children(&self) -> LinkedChildren<'a> {
        LinkedChildren {
            parent: Rc::new(self.clone()),
            iter: self.node.children().enumerate(),
            front: self.offset,
            back: self.offset + self.len(),
        }
    }

    /// The first child of the given kind.
    pub fn child(&self, kind: SyntaxKind) -> Option<LinkedNode<'a>> {
        self.children().find(|child| child.kind() == kind)
    }

    /// The last child of the given kind.
    pub fn last_child(&self, kind: SyntaxKind) -> Option<LinkedNode<'a>> {
        self.children().rev().find(|child| child.kind() == kind)
    }

    /// Children that are neither trivia nor zero-length errors.
    pub fn significant_children(&self) -> impl DoubleEndedIterator<Item = LinkedNode<'a>> {
        self.children().filter(|child| {
            !child.kind().is_trivia() && !(child.kind().is_error() && child.is_empty())
        })
    }

    /// Find the descendant (or self) with exactly the given range and kind.
    ///
    /// Of several nested candidates, the outermost one is returned.
    pub fn find(&self, range: Range<usize>, kind: SyntaxKind) -> Option<LinkedNode<'a>> {
        if self.range() == range && self.kind() == kind {
            return Some(self.clone());
        }
        if range.start < self.offset || range.end > self.end() {
            return None;
        }
        self.children()
            .filter(|child| child.offset <= range.start && range.end <= child.end())
            .find_map(|child| child.find(range.clone(), kind))
    }
}

/// Access to parents and siblings.
impl<'a> LinkedNode<'a> {
    /// Get this node's parent.
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// Get the kind of this node's parent.
    pub fn parent_kind(&self) -> Option<SyntaxKind> {
        Some(self.parent()?.node.kind())
    }

    /// Iterate over the strict ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = LinkedNode<'a>> + use<'a> {
        std::iter::successors(self.parent().cloned(), |node| node.parent().cloned())
    }

    /// The innermost strict ancestor matching `pred`.
    pub fn ancestor(&self, pred: impl Fn(SyntaxKind) -> bool) -> Option<LinkedNode<'a>> {
        self.ancestors().find(|node| pred(node.kind()))
    }

    /// Get the first previous non-trivia sibling node.
    pub fn prev_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        parent
            .children()
            .take(self.index)
            .rev()
            .find(|node| !node.kind().is_trivia())
    }

    /// Get the next non-trivia sibling node.
    pub fn next_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        parent
            .children()
            .skip(self.index + 1)
            .find(|node| !node.kind().is_trivia())
    }
}

/// Access to leaves.
impl<'a> LinkedNode<'a> {
    /// Get the leaf that contains the byte at `cursor`.
    ///
    /// Zero-length leaves are never returned.
    pub fn leaf_at(&self, cursor: usize) -> Option<Self> {
        if self.node.is_leaf() && self.offset <= cursor && cursor < self.end() {
            return Some(self.clone());
        }

        let mut offset = self.offset;
        for child in self.children() {
            let len = child.len();
            if offset <= cursor && cursor < offset + len {
                return child.leaf_at(cursor);
            }
            offset += len;
        }

        None
    }

    /// All non-empty leaves in source order.
    pub fn leaves(&self) -> Vec<LinkedNode<'a>> {
        let mut out = vec![];
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<LinkedNode<'a>>) {
        if self.node.is_leaf() {
            if !self.node.is_empty() {
                out.push(self.clone());
            }
            return;
        }
        for child in self.children() {
            child.collect_leaves(out);
        }
    }

    /// Find the rightmost contained non-trivia leaf.
    pub fn rightmost_leaf(&self) -> Option<Self> {
        if self.is_leaf() && !self.kind().is_trivia() && !self.is_empty() {
            return Some(self.clone());
        }

        for child in self.children().rev() {
            if let Some(leaf) = child.rightmost_leaf() {
                return Some(leaf);
            }
        }

        None
    }
}

impl Deref for LinkedNode<'_> {
    type Target = SyntaxNode;

    /// Dereference to a syntax node. Note that this shortens the lifetime, so
    /// you may need to use [`get()`](Self::get) instead in some situations.
    fn deref(&self) -> &Self::Target {
        self.get()
    }
}

impl Debug for LinkedNode<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.node.kind(), self.range())
    }
}

/// An iterator over the children of a linked node.
pub struct LinkedChildren<'a> {
    /// The parent whose children we're iterating.
    parent: Rc<LinkedNode<'a>>,
    /// The underlying syntax nodes and their indices.
    iter: std::iter::Enumerate<std::slice::Iter<'a, SyntaxNode>>,
    /// The byte offset of the next child's start.
    front: usize,
    /// The byte offset after the final child.
    back: usize,
}

impl<'a> Iterator for LinkedChildren<'a> {
    type Item = LinkedNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(index, node)| {
            let offset = self.front;
            self.front += node.len();
            LinkedNode {
                node,
                parent: Some(self.parent.clone()),
                index,
                offset,
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for LinkedChildren<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(index, node)| {
            self.back -= node.len();
            LinkedNode {
                node,
                parent: Some(self.parent.clone()),
                index,
                offset: self.back,
            }
        })
    }
}

impl ExactSizeIterator for LinkedChildren<'_> {}
