//! Choosing the node to repair and the order its pieces are visited in.

use std::collections::VecDeque;

use smartenter_core::Document;
use smartenter_syntax::{LinkedNode, SyntaxKind, SyntaxTree};

const BLANKS: &str = " \t";

/// The last byte position at or before `offset` whose byte is not in `chars`.
pub fn shift_backward(text: &str, offset: usize, chars: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let end = offset.min(bytes.len().checked_sub(1)?);
    bytes[..=end]
        .iter()
        .rposition(|byte| !chars.as_bytes().contains(byte))
}

/// The first byte position at or after `offset` whose byte is not in `chars`.
pub fn shift_forward(text: &str, offset: usize, chars: &str) -> usize {
    let bytes = text.as_bytes();
    let start = offset.min(bytes.len());
    bytes[start..]
        .iter()
        .position(|byte| !chars.as_bytes().contains(byte))
        .map_or(bytes.len(), |pos| start + pos)
}

/// The leaf the caret is "on": the last non-blank character before it on the same line,
/// or the first non-blank character after it.
fn leaf_at_caret<'a>(
    tree: &'a SyntaxTree,
    document: &Document,
    caret: usize,
) -> Option<LinkedNode<'a>> {
    let text = document.text();
    let offset = match caret.checked_sub(1) {
        Some(before) => shift_backward(&text, before, BLANKS).unwrap_or(0),
        None => 0,
    };
    let offset = if document.line_of(offset) < document.line_of(caret) {
        shift_forward(&text, caret, BLANKS)
    } else {
        offset
    };
    tree.leaf_at(offset)
}

/// Find the statement or member that Smart-Enter should complete.
///
/// Returns `None` when the caret rests on whitespace or a closing brace, inside a block
/// statement, or anywhere not covered by a statement or member.
pub fn find_repair_target<'a>(
    tree: &'a SyntaxTree,
    document: &Document,
    caret: usize,
) -> Option<LinkedNode<'a>> {
    let leaf = leaf_at_caret(tree, document, caret)?;
    if leaf.kind() == SyntaxKind::Whitespace || leaf.text().as_str() == "}" {
        return None;
    }

    let candidate = leaf.ancestor(|kind| {
        kind.is_statement() || kind.is_member() || kind.is_comment() || kind == SyntaxKind::CodeBlock
    })?;
    if candidate.kind() == SyntaxKind::BlockStatement {
        return None;
    }

    let promoted = candidate
        .parent()
        .filter(|parent| parent.kind() == SyntaxKind::ForStatement && !candidate.erroneous())
        .cloned();
    let candidate = promoted.unwrap_or(candidate);

    let kind = candidate.kind();
    (kind.is_statement() || kind.is_member()).then_some(candidate)
}

/// Nodes whose subtrees are not entered once the walk is below the target.
fn stops_descent(kind: SyntaxKind) -> bool {
    kind.is_statement()
        || matches!(
            kind,
            SyntaxKind::ClassDeclaration | SyntaxKind::CodeBlock | SyntaxKind::Method
        )
}

/// Every node the fixers visit for `target`, innermost first.
///
/// Nested statements and the insides of classes, methods and code blocks are left out.
/// The target itself closes the queue, so it is visited twice at the end.
pub fn collect_queue<'a>(target: &LinkedNode<'a>) -> Vec<LinkedNode<'a>> {
    let mut queue = VecDeque::new();
    collect(target, &mut queue, true);
    queue.push_back(target.clone());
    queue.into()
}

fn collect<'a>(node: &LinkedNode<'a>, queue: &mut VecDeque<LinkedNode<'a>>, mut recurse: bool) {
    queue.push_front(node.clone());
    if stops_descent(node.kind()) {
        if !recurse {
            return;
        }
        recurse = false;
    }

    let in_statement = node.kind().is_statement();
    for child in node.children() {
        if child.kind().is_trivia() || (in_statement && child.kind().is_statement()) {
            continue;
        }
        collect(&child, queue, recurse);
    }
}
