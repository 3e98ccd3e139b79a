use smartenter_syntax::{LinkedNode, SyntaxKind};

use super::FixContext;
use crate::SmartEnterError;

/// Whether a quoted literal lacks its closing quote.
fn is_unterminated(text: &str, quote: u8) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes.last() != Some(&quote) {
        return true;
    }
    let escapes = bytes[..bytes.len() - 1]
        .iter()
        .rev()
        .take_while(|&&byte| byte == b'\\')
        .count();
    escapes % 2 == 1
}

fn quote(node: &LinkedNode) -> Option<&'static str> {
    match node.kind() {
        SyntaxKind::StringLiteral => Some("\""),
        SyntaxKind::CharLiteral => Some("'"),
        _ => None,
    }
}

/// Whether `node` is a string or character literal still missing its closing quote.
pub(super) fn is_open(node: &LinkedNode) -> bool {
    quote(node).is_some_and(|quote| is_unterminated(node.text(), quote.as_bytes()[0]))
}

pub(super) fn fix(cx: &mut FixContext, node: &LinkedNode) -> Result<(), SmartEnterError> {
    match quote(node) {
        Some(quote) if is_open(node) => cx.insert(node.end(), quote),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_termination() {
        assert!(is_unterminated("\"", b'"'));
        assert!(is_unterminated("\"abc", b'"'));
        assert!(is_unterminated("\"a\\\"", b'"'));
        assert!(!is_unterminated("\"a\\\\\"", b'"'));
        assert!(!is_unterminated("\"\"", b'"'));
        assert!(!is_unterminated("'x'", b'\''));
        assert!(is_unterminated("'", b'\''));
    }
}
