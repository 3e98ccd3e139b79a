//! Caret placement once the target statement is syntactically complete.

use smartenter_core::Editor;
use smartenter_lang::{CodeStyle, CommentConfig};
use smartenter_syntax::{LinkedNode, SyntaxKind, SyntaxTree};

use crate::SmartEnterError;
use crate::fixers::ends_with_semicolon;
use crate::navigator::{shift_backward, shift_forward};

const BLANKS: &str = " \t";

/// A way of finishing a Smart-Enter. [`ENTER_RULES`] lists them in the order tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnterRule {
    /// Split the comment under the caret and continue it on the next line.
    CommentBreaker,
    /// Open a new line after a statement terminated by `;`.
    AfterSemicolon,
    /// Open a new line after a `return`, `throw`, `break` or `continue`, leaving the
    /// block it ends.
    BreakingControlFlow,
    /// Open a new line inside the body of a block-owning construct.
    Plain,
}

/// All enter rules; the first that reports `true` wins.
pub const ENTER_RULES: [EnterRule; 4] = [
    EnterRule::CommentBreaker,
    EnterRule::AfterSemicolon,
    EnterRule::BreakingControlFlow,
    EnterRule::Plain,
];

/// What an enter rule works with.
pub struct EnterContext<'a> {
    /// The edited document with its caret.
    pub editor: &'a mut Editor,
    /// A tree committed against the editor's document.
    pub tree: &'a SyntaxTree,
    /// Layout for new lines.
    pub style: &'a CodeStyle,
    /// Comment tokens for continued comments.
    pub comments: &'a CommentConfig,
}

impl EnterRule {
    /// Run the rule for `target`. Returns whether it handled the enter.
    pub fn apply(self, cx: &mut EnterContext, target: &LinkedNode) -> Result<bool, SmartEnterError> {
        match self {
            Self::CommentBreaker => break_comment(cx),
            Self::AfterSemicolon => after_semicolon(cx, target),
            Self::BreakingControlFlow => breaking_control_flow(cx, target),
            Self::Plain => plain(cx, target),
        }
    }
}

/// Where a caret inside `comment` may split it, as `(opener, continuation, inner end)`.
fn comment_layout(
    comment: &LinkedNode,
    comments: &CommentConfig,
) -> Option<(usize, String, usize)> {
    let text = comment.text();
    match comment.kind() {
        SyntaxKind::LineComment => {
            let opener = comments.line.as_deref().filter(|line| text.starts_with(line))?;
            Some((opener.len(), comments.line_continuation()?, comment.end()))
        }
        SyntaxKind::BlockComment => {
            let opener = comments
                .block_start
                .as_deref()
                .filter(|start| text.starts_with(start))?;
            let closer = comments.block_end.as_deref()?;
            let closed = text.len() >= opener.len() + closer.len() && text.ends_with(closer);
            let inner_end = if closed { comment.end() - closer.len() } else { comment.end() };
            Some((opener.len(), comments.block_continuation.clone()?, inner_end))
        }
        _ => None,
    }
}

/// Split the comment containing the caret. Works without a target.
pub fn break_comment(cx: &mut EnterContext) -> Result<bool, SmartEnterError> {
    let caret = cx.editor.caret();
    let comment = [Some(caret), caret.checked_sub(1)]
        .into_iter()
        .flatten()
        .filter_map(|offset| cx.tree.leaf_at(offset))
        .find(|leaf| leaf.kind().is_comment());
    let Some(comment) = comment else {
        return Ok(false);
    };
    let Some((opener, continuation, inner_end)) = comment_layout(&comment, cx.comments) else {
        return Ok(false);
    };
    let inner_start = comment.offset() + opener;
    if caret < inner_start || caret > inner_end {
        return Ok(false);
    }

    let document = cx.editor.document();
    let text = document.text();
    let from = shift_backward(&text, caret - 1, BLANKS).map_or(0, |pos| pos + 1).max(inner_start);
    let to = shift_forward(&text, caret, BLANKS).min(inner_end);
    let indent = match comment.kind() {
        SyntaxKind::BlockComment => document.line_indent(comment.offset()),
        _ => document.line_indent(caret),
    };

    let replacement = format!("\n{indent}{continuation}");
    cx.editor.replace(from, to.max(from), &replacement)?;
    cx.editor.move_caret_to(from + replacement.len());
    Ok(true)
}

fn after_semicolon(cx: &mut EnterContext, target: &LinkedNode) -> Result<bool, SmartEnterError> {
    let applies = match target.kind() {
        SyntaxKind::ExpressionStatement
        | SyntaxKind::DeclarationStatement
        | SyntaxKind::DoWhileStatement
        | SyntaxKind::Field => true,
        SyntaxKind::Method => target.child(SyntaxKind::CodeBlock).is_none(),
        _ => false,
    };
    if !applies || !ends_with_semicolon(target) {
        return Ok(false);
    }
    cx.editor.move_caret_to(target.end());
    cx.editor.insert_newline(cx.style)?;
    Ok(true)
}

/// The `}` of the braced block that `target` is the last statement of.
fn closing_brace_after(target: &LinkedNode) -> Option<usize> {
    let block = target.parent()?;
    if block.kind() != SyntaxKind::CodeBlock
        || block.parent_kind() != Some(SyntaxKind::BlockStatement)
    {
        return None;
    }
    let last = block
        .children()
        .rev()
        .find(|child| child.kind().is_statement())?;
    if last.offset() != target.offset() {
        return None;
    }
    block.child(SyntaxKind::RightBrace).map(|brace| brace.end())
}

fn breaking_control_flow(
    cx: &mut EnterContext,
    target: &LinkedNode,
) -> Result<bool, SmartEnterError> {
    if !matches!(
        target.kind(),
        SyntaxKind::ReturnStatement
            | SyntaxKind::ThrowStatement
            | SyntaxKind::BreakStatement
            | SyntaxKind::ContinueStatement
    ) || !ends_with_semicolon(target)
    {
        return Ok(false);
    }
    let offset = closing_brace_after(target).unwrap_or(target.end());
    cx.editor.move_caret_to(offset);
    cx.editor.insert_newline(cx.style)?;
    Ok(true)
}

/// The `{` opening the body that `target` owns.
fn body_brace<'a>(target: &LinkedNode<'a>) -> Option<LinkedNode<'a>> {
    let block = match target.kind() {
        SyntaxKind::ClassDeclaration => return target.child(SyntaxKind::LeftBrace),
        SyntaxKind::Method
        | SyntaxKind::Initializer
        | SyntaxKind::SwitchStatement
        | SyntaxKind::TryStatement
        | SyntaxKind::SynchronizedStatement
        | SyntaxKind::CatchSection => target.child(SyntaxKind::CodeBlock)?,
        kind if kind.is_control_statement() => target
            .child(SyntaxKind::BlockStatement)?
            .child(SyntaxKind::CodeBlock)?,
        _ => return None,
    };
    block.child(SyntaxKind::LeftBrace)
}

fn plain(cx: &mut EnterContext, target: &LinkedNode) -> Result<bool, SmartEnterError> {
    let Some(brace) = body_brace(target) else {
        return Ok(false);
    };
    cx.editor.move_caret_to(brace.end());
    cx.editor.insert_newline(cx.style)?;
    Ok(true)
}
