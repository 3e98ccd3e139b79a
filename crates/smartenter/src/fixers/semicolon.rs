use smartenter_syntax::{LinkedNode, MISSING_TYPE, SyntaxKind};

use super::{FixContext, is_bodiless_method, literal};
use crate::SmartEnterError;

fn needs_terminator(node: &LinkedNode) -> bool {
    match node.kind() {
        SyntaxKind::ExpressionStatement
        | SyntaxKind::DeclarationStatement
        | SyntaxKind::ReturnStatement
        | SyntaxKind::ThrowStatement
        | SyntaxKind::BreakStatement
        | SyntaxKind::ContinueStatement
        | SyntaxKind::DoWhileStatement
        | SyntaxKind::Field => true,
        SyntaxKind::Method => {
            node.child(SyntaxKind::CodeBlock).is_none() && is_bodiless_method(node)
        }
        _ => false,
    }
}

/// A declaration made of modifiers only, such as a lone `synchronized`.
fn lacks_type(node: &LinkedNode) -> bool {
    node.children().any(|child| match child.kind() {
        SyntaxKind::LocalVariable => lacks_type(&child),
        _ => {
            child.is_empty()
                && child
                    .error_message()
                    .is_some_and(|message| message.as_str() == MISSING_TYPE)
        }
    })
}

/// Terminate a statement, field or bodiless method with `;`.
///
/// The init and update parts of a `for` header are left to the loop fixers. A declaration
/// still missing its type only gets that hole registered, and one ending in an open
/// literal is left to the literal fixer.
pub(super) fn fix(cx: &mut FixContext, node: &LinkedNode) -> Result<(), SmartEnterError> {
    if !needs_terminator(node)
        || matches!(
            node.parent_kind(),
            Some(SyntaxKind::ForStatement | SyntaxKind::ForeachStatement)
        )
    {
        return Ok(());
    }

    cx.register_holes(node);
    if lacks_type(node) {
        return Ok(());
    }
    let Some(last) = node.significant_children().next_back() else {
        return Ok(());
    };
    if last.kind() == SyntaxKind::Semicolon
        || last.rightmost_leaf().is_some_and(|leaf| literal::is_open(&leaf))
    {
        return Ok(());
    }
    cx.insert(last.end(), ";")
}
