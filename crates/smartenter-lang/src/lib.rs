#![warn(missing_docs)]
//! `smartenter-lang` - data-driven language configuration for `smartenter`.
//!
//! This crate stays lightweight and does **not** depend on the syntax tree or the editor
//! kernel. It provides the small structs the Smart-Enter engine consults for comment
//! continuation and whitespace layout.

use serde::Deserialize;

/// Comment tokens/config for a given language.
///
/// The comment breaker uses this to continue a comment on the next line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
    /// Prefix written at the start of a continued block comment line (e.g. ` * `).
    pub block_continuation: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            ..Self::default()
        }
    }

    /// Create a config that supports only block comments.
    pub fn block(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            block_start: Some(start.into()),
            block_end: Some(end.into()),
            ..Self::default()
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
            block_continuation: None,
        }
    }

    /// The comment tokens of Java and other C-family languages.
    pub fn java() -> Self {
        Self::line_and_block("//", "/*", "*/").with_block_continuation(" * ")
    }

    /// Set the prefix written on continued block comment lines.
    pub fn with_block_continuation(mut self, prefix: impl Into<String>) -> Self {
        self.block_continuation = Some(prefix.into());
        self
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.line.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if both block comment tokens are configured.
    pub fn has_block(&self) -> bool {
        self.block_start.as_deref().is_some_and(|s| !s.is_empty())
            && self.block_end.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Text to start a continued line comment with (token plus one space).
    pub fn line_continuation(&self) -> Option<String> {
        self.line
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|token| format!("{token} "))
    }
}

/// Whitespace layout settings used by the reformatter and the new-line actions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodeStyle {
    /// Width of one indentation level, in columns.
    pub indent_size: usize,
    /// Indent with tab characters instead of spaces.
    pub use_tab_character: bool,
    /// Leave an empty `{}` block on a single line when reformatting.
    pub keep_simple_blocks_in_one_line: bool,
    /// Maximum number of blank lines kept between two tokens.
    pub keep_blank_lines: usize,
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self {
            indent_size: 4,
            use_tab_character: false,
            keep_simple_blocks_in_one_line: true,
            keep_blank_lines: 2,
        }
    }
}

impl CodeStyle {
    /// Set the indentation width.
    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    /// Indent with tabs (`true`) or spaces (`false`).
    pub fn with_tabs(mut self, use_tab_character: bool) -> Self {
        self.use_tab_character = use_tab_character;
        self
    }

    /// Set whether empty blocks stay on one line.
    pub fn with_keep_simple_blocks_in_one_line(mut self, keep: bool) -> Self {
        self.keep_simple_blocks_in_one_line = keep;
        self
    }

    /// Set the number of blank lines kept by the reformatter.
    pub fn with_keep_blank_lines(mut self, lines: usize) -> Self {
        self.keep_blank_lines = lines;
        self
    }

    /// One level of indentation.
    pub fn indent_unit(&self) -> String {
        if self.use_tab_character {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_size)
        }
    }

    /// Indentation for the given nesting depth.
    pub fn indent(&self, depth: usize) -> String {
        self.indent_unit().repeat(depth)
    }
}
