//! Structured text edits.
//!
//! Producers such as the reformatter describe their changes as a batch of [`TextEdit`]s
//! instead of rewriting whole ranges, so the caret and range markers keep tracking the
//! text they point at.

use std::ops::Range;

/// A single replacement expressed in byte offsets of the document it was computed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Replaced range.
    pub range: Range<usize>,
    /// Replacement text (may be empty).
    pub text: String,
}

impl TextEdit {
    /// Replace `range` with `text`.
    pub fn new(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    /// Insert `text` at `offset`.
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::new(offset..offset, text)
    }
}

/// Order `edits` so that applying them one after another never invalidates the offsets
/// of the edits still pending (last edit first).
pub fn sort_for_application(edits: &mut [TextEdit]) {
    edits.sort_by(|a, b| {
        b.range
            .start
            .cmp(&a.range.start)
            .then(b.range.end.cmp(&a.range.end))
    });
}
