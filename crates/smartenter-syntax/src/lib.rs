#![warn(missing_docs)]
//! Error-tolerant syntax trees for a Java subset.
//!
//! The parser accepts any input. Missing pieces show up as zero-length
//! [`SyntaxKind::Error`] nodes; unexpected tokens become error nodes that keep their text.
//! The concatenated text of a tree's leaves is always the source text.
//!
//! ```
//! use smartenter_syntax::{SourceKind, SyntaxKind, parse};
//!
//! let root = parse("if (x > 0", SourceKind::CodeFragment);
//! assert_eq!(root.to_string(), "if (x > 0");
//! let statement = root.children().next().unwrap();
//! assert_eq!(statement.kind(), SyntaxKind::IfStatement);
//! assert!(statement.erroneous());
//! ```

mod format;
mod kind;
mod lexer;
mod node;
mod parser;
mod tree;

pub use format::{depth, reformat};
pub use kind::SyntaxKind;
pub use node::{LinkedChildren, LinkedNode, SyntaxNode};
pub use parser::{MISSING_EXPRESSION, MISSING_IDENTIFIER, MISSING_TYPE, parse};
pub use tree::{SourceKind, SyntaxTree};
