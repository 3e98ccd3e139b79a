use smartenter_syntax::{LinkedNode, SyntaxKind};

use super::FixContext;
use crate::SmartEnterError;

/// Something that can stand as a condition: an expression node or a single operand.
fn is_condition(node: &LinkedNode) -> bool {
    let kind = node.kind();
    kind.is_expression()
        || kind.is_literal()
        || matches!(kind, SyntaxKind::Ident | SyntaxKind::This | SyntaxKind::Super)
}

/// Parenthesize or close the `(..)` that follows `keyword` in `statement` nodes.
pub(super) fn fix_header(
    cx: &mut FixContext,
    node: &LinkedNode,
    statement: SyntaxKind,
    keyword: SyntaxKind,
) -> Result<(), SmartEnterError> {
    if node.kind() != statement {
        return Ok(());
    }
    let Some(keyword) = node.child(keyword) else {
        return Ok(());
    };

    let header: Vec<_> = node
        .children()
        .skip(keyword.index() + 1)
        .take_while(|child| {
            !child.kind().is_statement()
                && !matches!(
                    child.kind(),
                    SyntaxKind::CodeBlock | SyntaxKind::Else | SyntaxKind::Semicolon
                )
        })
        .filter(|child| !child.kind().is_trivia())
        .collect();
    let find = |kind| header.iter().find(|child| child.kind() == kind);
    let condition = header.iter().find(|child| is_condition(child));

    let Some(lparen) = find(SyntaxKind::LeftParen) else {
        return match condition {
            Some(condition) => {
                let text = format!("({})", condition.get());
                cx.replace(condition.range(), &text)
            }
            None => {
                let at = keyword.end();
                cx.insert(at, "()")?;
                cx.register(at + 1);
                Ok(())
            }
        };
    };

    match condition {
        Some(condition) => cx.register_holes(condition),
        None => cx.register(lparen.end()),
    }
    if find(SyntaxKind::RightParen).is_none() {
        let at = condition.map_or(lparen.end(), |condition| condition.end());
        cx.insert(at, ")")?;
    }
    Ok(())
}

/// Add the `while ()` tail of a `do` loop, or fix the existing one.
pub(super) fn fix_do_while(cx: &mut FixContext, node: &LinkedNode) -> Result<(), SmartEnterError> {
    if node.kind() != SyntaxKind::DoWhileStatement {
        return Ok(());
    }
    if node.child(SyntaxKind::While).is_some() {
        return fix_header(cx, node, SyntaxKind::DoWhileStatement, SyntaxKind::While);
    }
    let Some(body) = node.children().find(|child| child.kind().is_statement()) else {
        return Ok(());
    };

    const TAIL: &str = " while ()";
    let at = body.end();
    cx.insert(at, TAIL)?;
    cx.register(at + TAIL.len() - 1);
    Ok(())
}

/// Add or close the `(Exception e)` part of a `catch`.
pub(super) fn fix_catch(cx: &mut FixContext, node: &LinkedNode) -> Result<(), SmartEnterError> {
    if node.kind() != SyntaxKind::CatchSection {
        return Ok(());
    }
    let Some(keyword) = node.child(SyntaxKind::Catch) else {
        return Ok(());
    };
    let Some(lparen) = node.child(SyntaxKind::LeftParen) else {
        let at = keyword.end();
        cx.insert(at, "()")?;
        cx.register(at + 1);
        return Ok(());
    };

    let parameter = node.child(SyntaxKind::Parameter);
    match &parameter {
        Some(parameter) => cx.register_holes(parameter),
        None => cx.register(lparen.end()),
    }
    if node.child(SyntaxKind::RightParen).is_none() {
        let at = parameter.map_or(lparen.end(), |parameter| parameter.end());
        cx.insert(at, ")")?;
    }
    Ok(())
}
