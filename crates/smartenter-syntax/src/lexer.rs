use ecow::{EcoString, eco_format};
use unscanny::Scanner;

use crate::{SyntaxKind, SyntaxNode};

/// An iterator over a source code string which returns tokens.
#[derive(Clone)]
pub(super) struct Lexer<'s> {
    /// The scanner: contains the underlying string and location as a "cursor".
    s: Scanner<'s>,
    /// An error for the last token.
    error: Option<EcoString>,
}

impl<'s> Lexer<'s> {
    /// Create a new lexer with the given source.
    pub fn new(text: &'s str) -> Self {
        Self {
            s: Scanner::new(text),
            error: None,
        }
    }

    /// The index in the string at which the last token ends and the next token will start.
    pub fn cursor(&self) -> usize {
        self.s.cursor()
    }

    /// Proceed to the next token and return a [`SyntaxNode`] containing it.
    ///
    /// At the end of the source this returns [`SyntaxKind::End`] with an empty leaf.
    pub fn next(&mut self) -> (SyntaxKind, SyntaxNode) {
        debug_assert!(self.error.is_none());
        let start = self.s.cursor();
        let kind = match self.s.eat() {
            Some(c) if is_space(c) => self.whitespace(),
            Some('/') if self.s.eat_if('/') => self.line_comment(),
            Some('/') if self.s.eat_if('*') => self.block_comment(),
            Some('"') => self.string(),
            Some('\'') => self.char_literal(),
            Some(c) if c.is_ascii_digit() => self.number(),
            Some('.') if self.s.at(|c: char| c.is_ascii_digit()) => self.number(),
            Some(c) if is_id_start(c) => self.ident(start),
            Some(c) => self.punct(c),
            None => SyntaxKind::End,
        };

        let text = self.s.from(start);
        let node = match self.error.take() {
            Some(message) => SyntaxNode::error(message, text),
            None => SyntaxNode::leaf(kind, text),
        };
        (node.kind(), node)
    }

    fn error(&mut self, message: impl Into<EcoString>) -> SyntaxKind {
        self.error = Some(message.into());
        SyntaxKind::Error
    }

    fn whitespace(&mut self) -> SyntaxKind {
        self.s.eat_while(is_space);
        SyntaxKind::Whitespace
    }

    fn line_comment(&mut self) -> SyntaxKind {
        self.s.eat_until(['\n', '\r']);
        SyntaxKind::LineComment
    }

    /// An unterminated block comment runs to the end of the source.
    fn block_comment(&mut self) -> SyntaxKind {
        loop {
            if self.s.done() || self.s.eat_if("*/") {
                break;
            }
            self.s.eat();
        }
        SyntaxKind::BlockComment
    }

    /// Eat a quoted literal up to its closing `quote`, a line break, or the end.
    fn quoted(&mut self, quote: char) {
        loop {
            match self.s.peek() {
                None | Some('\n') | Some('\r') => break,
                Some('\\') => {
                    self.s.eat();
                    if !self.s.at(['\n', '\r']) {
                        self.s.eat();
                    }
                }
                Some(c) => {
                    self.s.eat();
                    if c == quote {
                        break;
                    }
                }
            }
        }
    }

    fn string(&mut self) -> SyntaxKind {
        self.quoted('"');
        SyntaxKind::StringLiteral
    }

    fn char_literal(&mut self) -> SyntaxKind {
        self.quoted('\'');
        SyntaxKind::CharLiteral
    }

    fn number(&mut self) -> SyntaxKind {
        loop {
            let exponent = self.s.scout(-1).is_some_and(|c| c == 'e' || c == 'E');
            if self.s.eat_if(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
                continue;
            }
            if exponent && self.s.eat_if(['+', '-']) {
                continue;
            }
            break;
        }
        SyntaxKind::NumberLiteral
    }

    fn ident(&mut self, start: usize) -> SyntaxKind {
        self.s.eat_while(is_id_continue);
        keyword(self.s.from(start)).unwrap_or(SyntaxKind::Ident)
    }

    fn punct(&mut self, c: char) -> SyntaxKind {
        match c {
            '(' => SyntaxKind::LeftParen,
            ')' => SyntaxKind::RightParen,
            '{' => SyntaxKind::LeftBrace,
            '}' => SyntaxKind::RightBrace,
            '[' => SyntaxKind::LeftBracket,
            ']' => SyntaxKind::RightBracket,
            ';' => SyntaxKind::Semicolon,
            ',' => SyntaxKind::Comma,
            '.' => SyntaxKind::Dot,
            ':' => SyntaxKind::Colon,
            '?' => SyntaxKind::Question,
            '@' => SyntaxKind::At,
            '~' => SyntaxKind::Tilde,
            '=' if self.s.eat_if('=') => SyntaxKind::EqEq,
            '=' => SyntaxKind::Eq,
            '!' if self.s.eat_if('=') => SyntaxKind::BangEq,
            '!' => SyntaxKind::Bang,
            '<' if self.s.eat_if('=') => SyntaxKind::LtEq,
            '<' if self.s.eat_if("<=") => SyntaxKind::AssignOp,
            '<' => SyntaxKind::Lt,
            '>' if self.s.eat_if('=') => SyntaxKind::GtEq,
            '>' => SyntaxKind::Gt,
            '+' if self.s.eat_if('+') => SyntaxKind::PlusPlus,
            '+' if self.s.eat_if('=') => SyntaxKind::AssignOp,
            '+' => SyntaxKind::Plus,
            '-' if self.s.eat_if('-') => SyntaxKind::MinusMinus,
            '-' if self.s.eat_if('=') => SyntaxKind::AssignOp,
            '-' if self.s.eat_if('>') => SyntaxKind::Arrow,
            '-' => SyntaxKind::Minus,
            '&' if self.s.eat_if('&') => SyntaxKind::AmpAmp,
            '&' if self.s.eat_if('=') => SyntaxKind::AssignOp,
            '&' => SyntaxKind::Amp,
            '|' if self.s.eat_if('|') => SyntaxKind::PipePipe,
            '|' if self.s.eat_if('=') => SyntaxKind::AssignOp,
            '|' => SyntaxKind::Pipe,
            '*' if self.s.eat_if('=') => SyntaxKind::AssignOp,
            '*' => SyntaxKind::Star,
            '/' if self.s.eat_if('=') => SyntaxKind::AssignOp,
            '/' => SyntaxKind::Slash,
            '%' if self.s.eat_if('=') => SyntaxKind::AssignOp,
            '%' => SyntaxKind::Percent,
            '^' if self.s.eat_if('=') => SyntaxKind::AssignOp,
            '^' => SyntaxKind::Caret,
            _ => self.error(eco_format!("the character `{c}` is not valid here")),
        }
    }
}

fn keyword(ident: &str) -> Option<SyntaxKind> {
    Some(match ident {
        "package" => SyntaxKind::Package,
        "import" => SyntaxKind::Import,
        "class" => SyntaxKind::Class,
        "interface" => SyntaxKind::Interface,
        "enum" => SyntaxKind::Enum,
        "extends" => SyntaxKind::Extends,
        "implements" => SyntaxKind::Implements,
        "throws" => SyntaxKind::Throws,
        "void" => SyntaxKind::Void,
        "boolean" | "byte" | "char" | "short" | "int" | "long" | "float" | "double" => {
            SyntaxKind::PrimitiveType
        }
        "public" | "protected" | "private" | "static" | "final" | "abstract" | "native"
        | "transient" | "volatile" | "strictfp" => SyntaxKind::Modifier,
        "synchronized" => SyntaxKind::Synchronized,
        "if" => SyntaxKind::If,
        "else" => SyntaxKind::Else,
        "while" => SyntaxKind::While,
        "do" => SyntaxKind::Do,
        "for" => SyntaxKind::For,
        "switch" => SyntaxKind::Switch,
        "case" => SyntaxKind::Case,
        "default" => SyntaxKind::Default,
        "try" => SyntaxKind::Try,
        "catch" => SyntaxKind::Catch,
        "finally" => SyntaxKind::Finally,
        "return" => SyntaxKind::Return,
        "throw" => SyntaxKind::Throw,
        "break" => SyntaxKind::Break,
        "continue" => SyntaxKind::Continue,
        "new" => SyntaxKind::New,
        "this" => SyntaxKind::This,
        "super" => SyntaxKind::Super,
        "instanceof" => SyntaxKind::Instanceof,
        "true" | "false" => SyntaxKind::BoolLiteral,
        "null" => SyntaxKind::NullLiteral,
        _ => return None,
    })
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn is_id_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_id_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(SyntaxKind, String)> {
        let mut lexer = Lexer::new(text);
        let mut out = vec![];
        loop {
            let (kind, node) = lexer.next();
            if kind == SyntaxKind::End {
                break;
            }
            if kind != SyntaxKind::Whitespace {
                out.push((kind, node.text().to_string()));
            }
        }
        out
    }

    #[test]
    fn test_unterminated_string_stops_at_line_end() {
        let tokens = kinds("s = \"hello\nx");
        assert_eq!(tokens[2], (SyntaxKind::StringLiteral, "\"hello".into()));
        assert_eq!(tokens[3], (SyntaxKind::Ident, "x".into()));
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        let tokens = kinds(r#""a\"b" 'c"#);
        assert_eq!(tokens[0], (SyntaxKind::StringLiteral, r#""a\"b""#.into()));
        assert_eq!(tokens[1], (SyntaxKind::CharLiteral, "'c".into()));
    }

    #[test]
    fn test_operators_and_numbers() {
        let tokens = kinds("i++ <= 1.5e-3f && x->y");
        let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::Ident,
                SyntaxKind::PlusPlus,
                SyntaxKind::LtEq,
                SyntaxKind::NumberLiteral,
                SyntaxKind::AmpAmp,
                SyntaxKind::Ident,
                SyntaxKind::Arrow,
                SyntaxKind::Ident,
            ]
        );
        assert_eq!(tokens[3].1, "1.5e-3f");
    }

    #[test]
    fn test_comments() {
        let tokens = kinds("// a\n/* b */ /* open");
        assert_eq!(tokens[0], (SyntaxKind::LineComment, "// a".into()));
        assert_eq!(tokens[1], (SyntaxKind::BlockComment, "/* b */".into()));
        assert_eq!(tokens[2], (SyntaxKind::BlockComment, "/* open".into()));
    }
}
