#![warn(missing_docs)]
//! Smart-Enter - complete the Java statement at the caret and move to the next line
//!
//! # Overview
//!
//! One invocation of [`SmartEnterProcessor::process`] works in passes. Each pass parses
//! the document, picks the statement or member under the caret and runs the [`Fixer`]s
//! over it until one of them edits the text; the next pass starts from the new text.
//! Once a pass finds nothing left to fix, the surrounding code is reformatted and the
//! first applicable [`EnterRule`] places the caret.
//!
//! Fixers never guess expressions. A missing condition or return value is recorded in
//! the [`ErrorRegistry`] and the caret lands there instead of on a new line.
//!
//! A pass bound ([`MAX_ATTEMPTS`] by default) guards against fixers that never settle;
//! hitting it restores the document to its state before the invocation.
//!
//! # Quick Start
//!
//! ```rust
//! use smartenter::{Editor, NoPopup, SmartEnterConfig, SmartEnterProcessor, SourceKind};
//!
//! let config = SmartEnterConfig::default().with_source_kind(SourceKind::CodeFragment);
//! let processor = SmartEnterProcessor::new(config);
//!
//! let mut editor = Editor::new("foo(1, 2").with_caret(8);
//! assert!(processor.process(&mut editor, &NoPopup));
//! assert_eq!(editor.text(), "foo(1, 2);\n");
//! assert_eq!(editor.caret(), 11);
//! ```

pub mod config;
pub mod enter;
pub mod error;
pub mod fixers;
pub mod navigator;
pub mod popup;
pub mod processor;
pub mod registry;
pub mod session;

pub use config::{MAX_ATTEMPTS, SmartEnterConfig};
pub use enter::{ENTER_RULES, EnterContext, EnterRule};
pub use error::SmartEnterError;
pub use fixers::{FIXERS, FixContext, Fixer};
pub use navigator::{collect_queue, find_repair_target};
pub use popup::{CompletionPopup, NoPopup};
pub use processor::{Outcome, SmartEnterProcessor, SmartEnterReport};
pub use registry::ErrorRegistry;
pub use session::{SMART_ENTER_STAMP, Session};
pub use smartenter_core::Editor;
pub use smartenter_syntax::SourceKind;
