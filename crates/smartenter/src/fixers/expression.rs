use smartenter_syntax::{LinkedNode, SyntaxKind};

use super::FixContext;
use crate::SmartEnterError;

/// The keyword of a `return` or `throw` that carries no operand.
fn bare_keyword<'a>(
    node: &LinkedNode<'a>,
    statement: SyntaxKind,
    keyword: SyntaxKind,
) -> Option<LinkedNode<'a>> {
    if node.kind() != statement {
        return None;
    }
    let has_operand = node
        .significant_children()
        .any(|child| child.kind() != SyntaxKind::Semicolon && child.kind() != keyword);
    if has_operand {
        return None;
    }
    node.child(keyword)
}

/// Whether the method around `node` returns nothing. Constructors count as void.
fn in_void_method(node: &LinkedNode) -> bool {
    node.ancestor(|kind| kind == SyntaxKind::Method)
        .is_some_and(|method| {
            method
                .child(SyntaxKind::Type)
                .is_none_or(|ty| ty.get().to_string() == "void")
        })
}

pub(super) fn fix_return(cx: &mut FixContext, node: &LinkedNode) -> Result<(), SmartEnterError> {
    if let Some(keyword) = bare_keyword(node, SyntaxKind::ReturnStatement, SyntaxKind::Return)
        && !in_void_method(node)
    {
        cx.register(keyword.end());
    }
    Ok(())
}

pub(super) fn fix_throw(cx: &mut FixContext, node: &LinkedNode) -> Result<(), SmartEnterError> {
    if let Some(keyword) = bare_keyword(node, SyntaxKind::ThrowStatement, SyntaxKind::Throw) {
        cx.register(keyword.end());
    }
    Ok(())
}
