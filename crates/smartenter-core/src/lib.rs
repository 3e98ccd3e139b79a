#![warn(missing_docs)]
//! Smart-Enter Core - headless document and editor state
//!
//! # Overview
//!
//! `smartenter-core` holds the mutable state a statement-completion engine works on:
//!
//! - [`Document`]: rope-backed text addressed by byte offsets, with a modification stamp
//!   that changes on every effective edit.
//! - [`Editor`]: the document plus a caret, range markers that follow edits, and typed
//!   per-session user data.
//! - [`TextEdit`]: batched replacements produced by formatters and applied in one go.
//!
//! # Quick Start
//!
//! ```rust
//! use smartenter_core::Editor;
//! use smartenter_lang::CodeStyle;
//!
//! let mut editor = Editor::new("if (ok) {}").with_caret(9);
//! editor.insert_newline(&CodeStyle::default()).unwrap();
//!
//! assert_eq!(editor.text(), "if (ok) {\n    \n}");
//! assert_eq!(editor.caret(), 14);
//! ```

pub mod delta;
pub mod document;
pub mod editor;

pub use delta::TextEdit;
pub use document::{Document, EditError};
pub use editor::{Editor, Key, RangeMarkerId};
pub use smartenter_lang::{CodeStyle, CommentConfig};
