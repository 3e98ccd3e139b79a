//! Whitespace-only reformatting of a range of a syntax tree.
//!
//! The reformatter never adds, removes or reorders tokens. It only rewrites the gaps
//! between them: indentation of lines that start inside the range, blank-line limits,
//! and a few same-line spacing rules.

use std::ops::Range;

use smartenter_core::TextEdit;
use smartenter_lang::CodeStyle;

use crate::{LinkedNode, SyntaxKind, SyntaxTree};

/// Compute the edits that reformat the gaps touching `range`.
///
/// A gap between two tokens is considered when the token before it ends at or before
/// `range.end` and the token after it starts at or after `range.start`. The returned edits
/// are non-overlapping and computed against the tree's text.
pub fn reformat(tree: &SyntaxTree, range: Range<usize>, style: &CodeStyle) -> Vec<TextEdit> {
    let text = tree.text();
    let root = tree.root();
    let tokens: Vec<_> = root
        .leaves()
        .into_iter()
        .filter(|leaf| leaf.kind() != SyntaxKind::Whitespace)
        .collect();

    let mut edits = vec![];
    for pair in tokens.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.end() > range.end || next.offset() < range.start {
            continue;
        }
        let gap = &text[prev.end()..next.offset()];
        let wanted = gap_text(prev, next, gap, style);
        if wanted != gap {
            edits.push(TextEdit::new(prev.end()..next.offset(), wanted));
        }
    }
    edits
}

fn gap_text(prev: &LinkedNode, next: &LinkedNode, gap: &str, style: &CodeStyle) -> String {
    let newlines = gap.matches('\n').count();
    if newlines > 0 {
        let keep = newlines.min(style.keep_blank_lines + 1);
        return "\n".repeat(keep) + &style.indent(depth(next));
    }

    if !style.keep_simple_blocks_in_one_line && is_empty_block(prev, next) {
        return format!("\n{}", style.indent(depth(next)));
    }

    let spaced = match (prev.kind(), next.kind()) {
        (
            SyntaxKind::LeftParen | SyntaxKind::LeftBrace | SyntaxKind::LeftBracket,
            SyntaxKind::LeftBrace,
        ) => false,
        (_, SyntaxKind::LeftBrace) => true,
        (
            SyntaxKind::If
            | SyntaxKind::While
            | SyntaxKind::For
            | SyntaxKind::Switch
            | SyntaxKind::Catch
            | SyntaxKind::Synchronized,
            SyntaxKind::LeftParen,
        ) => true,
        (
            SyntaxKind::RightBrace,
            SyntaxKind::Else | SyntaxKind::Catch | SyntaxKind::Finally | SyntaxKind::While,
        ) => true,
        _ => false,
    };
    if spaced && gap.is_empty() {
        return " ".into();
    }
    gap.into()
}

/// `{` directly followed by `}` of the same code block.
fn is_empty_block(prev: &LinkedNode, next: &LinkedNode) -> bool {
    if prev.kind() != SyntaxKind::LeftBrace || next.kind() != SyntaxKind::RightBrace {
        return false;
    }
    match (prev.parent(), next.parent()) {
        (Some(open), Some(close)) => {
            open.kind() == SyntaxKind::CodeBlock && open.range() == close.range()
        }
        _ => false,
    }
}

/// The indentation depth of a line starting with `token`.
pub fn depth(token: &LinkedNode) -> usize {
    let pos = token.offset();
    let mut depth = 0;
    let mut child = token.clone();
    for ancestor in token.ancestors() {
        if matches!(
            ancestor.kind(),
            SyntaxKind::CodeBlock | SyntaxKind::ClassDeclaration
        ) {
            let open = ancestor.child(SyntaxKind::LeftBrace);
            let close = ancestor.last_child(SyntaxKind::RightBrace);
            if open.is_some_and(|open| open.offset() < pos)
                && close.is_none_or(|close| pos < close.offset())
            {
                depth += 1;
            }
        }

        if is_control_body(&ancestor, &child) {
            depth += 1;
        }

        if ancestor.kind() == SyntaxKind::CodeBlock
            && ancestor.parent_kind() == Some(SyntaxKind::SwitchStatement)
            && child.kind().is_statement()
            && child.kind() != SyntaxKind::SwitchLabel
        {
            depth += 1;
        }

        child = ancestor;
    }
    depth
}

/// Whether `child` is an unbraced body statement of the control statement `ancestor`.
fn is_control_body(ancestor: &LinkedNode, child: &LinkedNode) -> bool {
    if !ancestor.kind().is_control_statement()
        || !child.kind().is_statement()
        || child.kind() == SyntaxKind::BlockStatement
    {
        return false;
    }
    match ancestor.kind() {
        SyntaxKind::IfStatement => child.kind() != SyntaxKind::IfStatement,
        SyntaxKind::ForStatement | SyntaxKind::ForeachStatement => ancestor
            .child(SyntaxKind::RightParen)
            .is_some_and(|paren| paren.offset() < child.offset()),
        _ => true,
    }
}
