use smartenter_syntax::{LinkedNode, SyntaxKind};

use super::{FixContext, significant_end};
use crate::SmartEnterError;

/// Mark empty arguments and close the argument list of a call or `new` expression.
pub(super) fn fix_method_call(
    cx: &mut FixContext,
    node: &LinkedNode,
) -> Result<(), SmartEnterError> {
    if !matches!(
        node.kind(),
        SyntaxKind::MethodCall | SyntaxKind::NewExpression
    ) {
        return Ok(());
    }
    let Some(arguments) = node.child(SyntaxKind::ArgumentList) else {
        return Ok(());
    };
    cx.register_holes(&arguments);
    close_list(cx, &arguments, SyntaxKind::ArgumentList, SyntaxKind::RightParen, ")")
}

pub(super) fn fix_parenthesized(
    cx: &mut FixContext,
    node: &LinkedNode,
) -> Result<(), SmartEnterError> {
    if node.kind() != SyntaxKind::Parenthesized {
        return Ok(());
    }
    cx.register_holes(node);
    close_list(cx, node, SyntaxKind::Parenthesized, SyntaxKind::RightParen, ")")
}

/// Append `closer` after the last significant child of a `kind` node lacking `delimiter`.
pub(super) fn close_list(
    cx: &mut FixContext,
    node: &LinkedNode,
    kind: SyntaxKind,
    delimiter: SyntaxKind,
    closer: &str,
) -> Result<(), SmartEnterError> {
    if node.kind() != kind || node.child(delimiter).is_some() {
        return Ok(());
    }
    cx.insert(significant_end(node), closer)
}
