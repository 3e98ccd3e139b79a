//! Engine configuration.

use serde::Deserialize;
use smartenter_lang::{CodeStyle, CommentConfig};
use smartenter_syntax::SourceKind;

use crate::SmartEnterError;

/// Upper bound on repair passes per invocation.
pub const MAX_ATTEMPTS: usize = 20;

/// Settings for [`SmartEnterProcessor`](crate::SmartEnterProcessor).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SmartEnterConfig {
    /// Layout used by the reformatter and the new-line actions.
    pub style: CodeStyle,
    /// Comment tokens used when breaking a comment.
    pub comments: CommentConfig,
    /// Grammar entry point for the edited document.
    pub source_kind: SourceKind,
    /// Repair passes allowed before the document is rolled back.
    pub max_attempts: usize,
}

impl Default for SmartEnterConfig {
    fn default() -> Self {
        Self {
            style: CodeStyle::default(),
            comments: CommentConfig::java(),
            source_kind: SourceKind::CompilationUnit,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl SmartEnterConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SmartEnterError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the code style.
    pub fn with_style(mut self, style: CodeStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the comment tokens.
    pub fn with_comments(mut self, comments: CommentConfig) -> Self {
        self.comments = comments;
        self
    }

    /// Set what kind of source the document holds.
    pub fn with_source_kind(mut self, source_kind: SourceKind) -> Self {
        self.source_kind = source_kind;
        self
    }

    /// Set the pass bound.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}
