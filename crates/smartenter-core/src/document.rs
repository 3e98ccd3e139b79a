//! Rope-backed document text with a modification stamp.
//!
//! All offsets are **byte offsets** into the UTF-8 text and must fall on character boundaries.

use ropey::Rope;
use std::ops::Range;
use thiserror::Error;

/// Errors produced by document edits and range queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("offset {offset} is out of bounds (document length {len})")]
    /// The offset lies past the end of the document.
    OffsetOutOfBounds {
        /// Requested offset.
        offset: usize,
        /// Document length in bytes.
        len: usize,
    },

    #[error("invalid range {start}..{end}")]
    /// The range start lies after its end.
    InvalidRange {
        /// Range start.
        start: usize,
        /// Range end.
        end: usize,
    },

    #[error("offset {0} is not on a character boundary")]
    /// The offset splits a multi-byte character.
    NotCharBoundary(usize),
}

/// Document text plus a monotonically increasing modification stamp.
///
/// Every effective [`Document::replace`] bumps the stamp, so two equal stamps always refer
/// to the same text.
#[derive(Debug, Clone, Default)]
pub struct Document {
    rope: Rope,
    stamp: u64,
}

impl Document {
    /// Create a document holding `text`.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            stamp: 0,
        }
    }

    /// The full text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Returns `true` if the document holds no text.
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Current modification stamp.
    pub fn modification_stamp(&self) -> u64 {
        self.stamp
    }

    /// Number of lines (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns `true` if `offset` is inside the document and on a character boundary.
    pub fn is_char_boundary(&self, offset: usize) -> bool {
        offset <= self.len() && self.rope.char_to_byte(self.rope.byte_to_char(offset)) == offset
    }

    fn check_offset(&self, offset: usize) -> Result<(), EditError> {
        if offset > self.len() {
            return Err(EditError::OffsetOutOfBounds {
                offset,
                len: self.len(),
            });
        }
        if !self.is_char_boundary(offset) {
            return Err(EditError::NotCharBoundary(offset));
        }
        Ok(())
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), EditError> {
        if range.start > range.end {
            return Err(EditError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        self.check_offset(range.start)?;
        self.check_offset(range.end)
    }

    /// Text in `range`.
    pub fn slice(&self, range: Range<usize>) -> Result<String, EditError> {
        self.check_range(&range)?;
        let start = self.rope.byte_to_char(range.start);
        let end = self.rope.byte_to_char(range.end);
        Ok(self.rope.slice(start..end).to_string())
    }

    /// The character starting at `offset`, if any.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset >= self.len() || !self.is_char_boundary(offset) {
            return None;
        }
        self.rope.get_char(self.rope.byte_to_char(offset))
    }

    /// Returns `true` if the text at `offset` starts with `literal`.
    pub fn region_matches(&self, offset: usize, literal: &str) -> bool {
        let end = offset + literal.len();
        if end > self.len() || !self.is_char_boundary(offset) || !self.is_char_boundary(end) {
            return false;
        }
        let start = self.rope.byte_to_char(offset);
        let end = self.rope.byte_to_char(end);
        self.rope.slice(start..end) == literal
    }

    /// Replace `from..to` with `text` in one atomic step.
    ///
    /// Replacing an empty range with an empty string leaves the stamp untouched.
    pub fn replace(&mut self, from: usize, to: usize, text: &str) -> Result<(), EditError> {
        self.check_range(&(from..to))?;
        if from == to && text.is_empty() {
            return Ok(());
        }
        let start = self.rope.byte_to_char(from);
        let end = self.rope.byte_to_char(to);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.stamp += 1;
        Ok(())
    }

    /// Insert `text` at `offset`.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), EditError> {
        self.replace(offset, offset, text)
    }

    /// Delete the text in `range`.
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), EditError> {
        self.replace(range.start, range.end, "")
    }

    /// Zero-based line containing `offset` (clamped to the document).
    pub fn line_of(&self, offset: usize) -> usize {
        self.rope.byte_to_line(offset.min(self.len()))
    }

    /// Byte offset of the first character of `line` (clamped to the document).
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.len();
        }
        self.rope.line_to_byte(line)
    }

    /// Byte offset just before the line break ending `line`.
    pub fn line_end(&self, line: usize) -> usize {
        let start = self.line_start(line);
        let mut end = if line + 1 < self.rope.len_lines() {
            self.rope.line_to_byte(line + 1)
        } else {
            self.len()
        };
        while end > start {
            let prev = self.rope.byte_to_char(end) - 1;
            match self.rope.get_char(prev) {
                Some('\n') | Some('\r') => end = self.rope.char_to_byte(prev),
                _ => break,
            }
        }
        end
    }

    /// Leading spaces and tabs of the line containing `offset`.
    pub fn line_indent(&self, offset: usize) -> String {
        let start = self.line_start(self.line_of(offset));
        self.rope
            .chars_at(self.rope.byte_to_char(start))
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_bumps_stamp_once() {
        let mut doc = Document::new("abc");
        doc.replace(1, 2, "XY").unwrap();
        assert_eq!(doc.text(), "aXYc");
        assert_eq!(doc.modification_stamp(), 1);

        doc.replace(2, 2, "").unwrap();
        assert_eq!(doc.modification_stamp(), 1);
    }

    #[test]
    fn test_replace_rejects_split_character() {
        let mut doc = Document::new("héllo");
        assert_eq!(doc.replace(2, 3, "e"), Err(EditError::NotCharBoundary(2)));
        assert_eq!(doc.text(), "héllo");
        assert_eq!(doc.modification_stamp(), 0);
    }
}
