//! A parsed snapshot of a [`Document`], tagged with the stamp it was parsed at.

use std::ops::Range;

use serde::Deserialize;
use smartenter_core::Document;

use crate::{LinkedNode, SyntaxKind, SyntaxNode, parse};

/// What a document holds, and therefore which grammar entry point parses it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A whole `.java` file: package, imports and type declarations.
    #[default]
    CompilationUnit,
    /// A sequence of block statements, as typed into a code fragment editor.
    CodeFragment,
}

/// The syntax tree of a document at one modification stamp.
///
/// Nodes obtained from the tree describe the document only while
/// [`SyntaxTree::is_committed`] holds. Every edit bumps the stamp, so callers re-commit
/// after editing and look nodes up again.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: SyntaxNode,
    stamp: u64,
    kind: SourceKind,
}

impl SyntaxTree {
    /// Parse the current text of `document`.
    pub fn parse(document: &Document, kind: SourceKind) -> Self {
        Self {
            root: parse(&document.text(), kind),
            stamp: document.modification_stamp(),
            kind,
        }
    }

    /// Reparse if the document changed since the tree was built.
    pub fn commit(&mut self, document: &Document) {
        if !self.is_committed(document) {
            *self = Self::parse(document, self.kind);
        }
    }

    /// Whether the tree matches the document's current text.
    pub fn is_committed(&self, document: &Document) -> bool {
        self.stamp == document.modification_stamp()
    }

    /// The document stamp this tree was parsed at.
    pub fn stamp(&self) -> u64 {
        self.stamp
    }

    /// The grammar used for this tree.
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// The untraversed root node.
    pub fn node(&self) -> &SyntaxNode {
        &self.root
    }

    /// The root, ready for traversal.
    pub fn root(&self) -> LinkedNode<'_> {
        LinkedNode::new(&self.root)
    }

    /// The text the tree was parsed from.
    pub fn text(&self) -> String {
        self.root.to_string()
    }

    /// The non-empty leaf containing the byte at `offset`.
    pub fn leaf_at(&self, offset: usize) -> Option<LinkedNode<'_>> {
        self.root().leaf_at(offset)
    }

    /// The outermost node with exactly `range` and `kind`.
    pub fn find_in_range(&self, range: Range<usize>, kind: SyntaxKind) -> Option<LinkedNode<'_>> {
        self.root().find(range, kind)
    }
}
