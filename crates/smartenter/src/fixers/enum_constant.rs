use smartenter_syntax::{LinkedNode, SyntaxKind};

use super::FixContext;
use crate::SmartEnterError;

/// The nearest sibling that is neither trivia nor a zero-length error.
fn neighbour<'a>(node: &LinkedNode<'a>, forward: bool) -> Option<LinkedNode<'a>> {
    let step = move |node: &LinkedNode<'a>| {
        if forward {
            node.next_sibling()
        } else {
            node.prev_sibling()
        }
    };
    std::iter::successors(step(node), step)
        .find(|sibling| !(sibling.kind().is_error() && sibling.is_empty()))
}

/// Put a `,` between two enum constants, or a `;` between the last constant and a member.
pub(super) fn fix(
    cx: &mut FixContext,
    node: &LinkedNode,
) -> Result<(), SmartEnterError> {
    if node.kind() != SyntaxKind::EnumConstant {
        return Ok(());
    }
    if let Some(previous) = neighbour(node, false)
        && previous.kind() == SyntaxKind::EnumConstant
    {
        return cx.insert(previous.end(), ",");
    }

    match neighbour(node, true).map(|next| next.kind()) {
        Some(SyntaxKind::EnumConstant) => cx.insert(node.end(), ","),
        Some(kind) if kind.is_member() => cx.insert(node.end(), ";"),
        _ => Ok(()),
    }
}
