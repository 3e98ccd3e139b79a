use smartenter_core::Document;
use smartenter_syntax::{LinkedNode, SyntaxKind};

use super::{FixContext, ends_with_semicolon, is_bodiless_method, significant_end, statement_after};
use crate::SmartEnterError;

fn indent_width(document: &Document, offset: usize) -> usize {
    document.line_indent(offset).len()
}

/// An unbraced body on a later line that is not indented past its header reads as the
/// next statement rather than as the body.
fn is_detached(document: &Document, header_end: usize, body: &LinkedNode) -> bool {
    body.kind() != SyntaxKind::BlockStatement
        && document.line_of(body.offset()) > document.line_of(header_end)
        && indent_width(document, body.offset()) <= indent_width(document, header_end)
}

fn is_missing(document: &Document, header_end: usize, body: Option<&LinkedNode>) -> bool {
    body.is_none_or(|body| is_detached(document, header_end, body))
}

/// The `then` branch of an `if`: a statement between `)` and `else`.
fn then_branch<'a>(node: &LinkedNode<'a>, rparen: &LinkedNode) -> Option<LinkedNode<'a>> {
    node.children()
        .skip(rparen.index() + 1)
        .take_while(|child| child.kind() != SyntaxKind::Else)
        .find(|child| child.kind().is_statement())
}

/// Wrap an unbraced body that starts on a later, deeper indented line into `{ .. }`.
pub(super) fn fix_block_brace(
    cx: &mut FixContext,
    node: &LinkedNode,
) -> Result<(), SmartEnterError> {
    if !matches!(
        node.kind(),
        SyntaxKind::IfStatement
            | SyntaxKind::WhileStatement
            | SyntaxKind::ForStatement
            | SyntaxKind::ForeachStatement
    ) {
        return Ok(());
    }
    let Some(rparen) = node.child(SyntaxKind::RightParen) else {
        return Ok(());
    };
    let body = match node.kind() {
        SyntaxKind::IfStatement => then_branch(node, &rparen),
        _ => statement_after(node, &rparen),
    };
    let Some(body) = body else {
        return Ok(());
    };

    let header_end = rparen.end();
    let document = cx.document();
    if body.kind() == SyntaxKind::BlockStatement
        || document.line_of(body.offset()) == document.line_of(header_end)
        || is_detached(document, header_end, &body)
    {
        return Ok(());
    }
    let gap = document.slice(header_end..body.offset())?;
    if body.erroneous() {
        cx.register(body.offset());
        return Ok(());
    }

    let text = format!("{{{gap}{}\n}}", body.get());
    cx.replace(header_end..body.end(), &text)
}

pub(super) fn fix_if_branches(
    cx: &mut FixContext,
    node: &LinkedNode,
) -> Result<(), SmartEnterError> {
    if node.kind() != SyntaxKind::IfStatement {
        return Ok(());
    }
    let Some(rparen) = node.child(SyntaxKind::RightParen) else {
        return Ok(());
    };
    let then = then_branch(node, &rparen);
    if is_missing(cx.document(), rparen.end(), then.as_ref()) {
        return cx.insert_block(rparen.end());
    }

    if let Some(keyword) = node.child(SyntaxKind::Else)
        && statement_after(node, &keyword).is_none()
    {
        return cx.insert_block(keyword.end());
    }
    Ok(())
}

/// The body the parser attached to a loop header that is still open: a block, or a
/// statement on a later line than the `(`.
fn open_header_body<'a>(
    document: &Document,
    node: &LinkedNode<'a>,
    lparen: &LinkedNode,
) -> Option<LinkedNode<'a>> {
    node.children().skip(lparen.index() + 1).find(|child| {
        child.kind() == SyntaxKind::BlockStatement
            || (child.kind().is_statement()
                && document.line_of(child.offset()) > document.line_of(lparen.offset()))
    })
}

/// Insert `closer` after the last header part in front of `body`, together with `{}`
/// unless an attached body is already there.
fn close_header(
    cx: &mut FixContext,
    node: &LinkedNode,
    lparen: &LinkedNode,
    body: Option<LinkedNode>,
    closer: &str,
) -> Result<(), SmartEnterError> {
    let at = node
        .significant_children()
        .filter(|child| child.index() >= lparen.index())
        .take_while(|child| body.as_ref().is_none_or(|body| child.index() < body.index()))
        .last()
        .map_or(lparen.end(), |child| child.end());
    let attached = body.is_some_and(|body| {
        body.kind() == SyntaxKind::CodeBlock || !is_detached(cx.document(), at, &body)
    });
    if attached {
        return cx.insert(at, closer);
    }
    cx.insert(at, &format!("{closer}{{}}"))?;
    cx.editor.move_caret_to(at + closer.len());
    Ok(())
}

/// Close a for-each header or add the body of a `while` or for-each loop.
pub(super) fn fix_loop_body(
    cx: &mut FixContext,
    node: &LinkedNode,
    kind: SyntaxKind,
) -> Result<(), SmartEnterError> {
    if node.kind() != kind {
        return Ok(());
    }
    let Some(rparen) = node.child(SyntaxKind::RightParen) else {
        if kind == SyntaxKind::ForeachStatement
            && let Some(lparen) = node.child(SyntaxKind::LeftParen)
        {
            let body = open_header_body(cx.document(), node, &lparen);
            return close_header(cx, node, &lparen, body, ")");
        }
        return Ok(());
    };
    let body = statement_after(node, &rparen);
    if is_missing(cx.document(), rparen.end(), body.as_ref()) {
        return cx.insert_block(rparen.end());
    }
    Ok(())
}

/// Complete the header of a counting `for` with its missing separators and `)`, and add
/// the body.
pub(super) fn fix_for_body(cx: &mut FixContext, node: &LinkedNode) -> Result<(), SmartEnterError> {
    if node.kind() != SyntaxKind::ForStatement {
        return Ok(());
    }
    let Some(lparen) = node.child(SyntaxKind::LeftParen) else {
        return Ok(());
    };
    let Some(rparen) = node.child(SyntaxKind::RightParen) else {
        let init_closed = node
            .children()
            .find(|child| child.kind().is_statement())
            .is_some_and(|init| ends_with_semicolon(&init));
        let separators = usize::from(init_closed)
            + node
                .children()
                .filter(|child| child.kind() == SyntaxKind::Semicolon)
                .count();
        let closer = format!("{})", ";".repeat(2usize.saturating_sub(separators)));
        let body = open_header_body(cx.document(), node, &lparen);
        return close_header(cx, node, &lparen, body, &closer);
    };
    let body = statement_after(node, &rparen);
    if is_missing(cx.document(), rparen.end(), body.as_ref()) {
        return cx.insert_block(rparen.end());
    }
    Ok(())
}

/// Add the block of a `switch` or `catch` once its header is closed.
pub(super) fn fix_block_body(
    cx: &mut FixContext,
    node: &LinkedNode,
    kind: SyntaxKind,
) -> Result<(), SmartEnterError> {
    if node.kind() != kind || node.child(SyntaxKind::CodeBlock).is_some() {
        return Ok(());
    }
    match node.last_child(SyntaxKind::RightParen) {
        Some(rparen) => cx.insert_block(rparen.end()),
        None => Ok(()),
    }
}

/// Close the lock of a `synchronized` and add its block.
pub(super) fn fix_synchronized_body(
    cx: &mut FixContext,
    node: &LinkedNode,
) -> Result<(), SmartEnterError> {
    if node.kind() != SyntaxKind::SynchronizedStatement {
        return Ok(());
    }
    let Some(lparen) = node.child(SyntaxKind::LeftParen) else {
        return Ok(());
    };
    cx.register_holes(node);
    if node.child(SyntaxKind::RightParen).is_none() {
        let block = node.child(SyntaxKind::CodeBlock);
        return close_header(cx, node, &lparen, block, ")");
    }
    fix_block_body(cx, node, SyntaxKind::SynchronizedStatement)
}

pub(super) fn fix_method_body(
    cx: &mut FixContext,
    node: &LinkedNode,
) -> Result<(), SmartEnterError> {
    if node.kind() != SyntaxKind::Method
        || node.child(SyntaxKind::CodeBlock).is_some()
        || node.child(SyntaxKind::Semicolon).is_some()
        || is_bodiless_method(node)
    {
        return Ok(());
    }
    let closed = node
        .child(SyntaxKind::ParameterList)
        .is_some_and(|parameters| parameters.child(SyntaxKind::RightParen).is_some());
    if !closed {
        return Ok(());
    }
    cx.insert_block(significant_end(node))
}
