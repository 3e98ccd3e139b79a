//! Editor state: a document plus caret, range markers and per-session user data.

use crate::delta::{TextEdit, sort_for_application};
use crate::document::{Document, EditError};
use smartenter_lang::CodeStyle;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;

/// Typed key for [`Editor`] user data.
pub struct Key<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    /// Create a key. Keys with the same name address the same slot.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The key's name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.name)
    }
}

/// Handle to a range marker created by [`Editor::create_range_marker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeMarkerId(usize);

/// Move a position across the replacement of `from..to` by `inserted` bytes.
///
/// Positions at or before `from` stay put, positions at or after `to` shift, positions
/// strictly inside the replaced range land at the end of the replacement.
fn shift_position(pos: usize, from: usize, to: usize, inserted: usize) -> usize {
    if pos <= from {
        pos
    } else if pos >= to {
        pos - (to - from) + inserted
    } else {
        from + inserted
    }
}

/// A document with a caret, range markers and typed user data.
pub struct Editor {
    document: Document,
    caret: usize,
    markers: Vec<Option<Range<usize>>>,
    user_data: HashMap<&'static str, Box<dyn Any>>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("document", &self.document)
            .field("caret", &self.caret)
            .field("markers", &self.markers)
            .field("user_data", &self.user_data.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Editor {
    /// Create an editor over `text` with the caret at offset 0.
    pub fn new(text: &str) -> Self {
        Self::from_document(Document::new(text))
    }

    /// Create an editor over an existing document.
    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            caret: 0,
            markers: Vec::new(),
            user_data: HashMap::new(),
        }
    }

    /// Place the caret (builder form of [`Editor::move_caret_to`]).
    pub fn with_caret(mut self, offset: usize) -> Self {
        self.move_caret_to(offset);
        self
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The full document text.
    pub fn text(&self) -> String {
        self.document.text()
    }

    /// Caret byte offset.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret, clamping it into the document and onto a character boundary.
    pub fn move_caret_to(&mut self, offset: usize) {
        let mut offset = offset.min(self.document.len());
        while !self.document.is_char_boundary(offset) {
            offset -= 1;
        }
        self.caret = offset;
    }

    /// Replace `from..to` with `text`, keeping the caret and range markers on their text.
    pub fn replace(&mut self, from: usize, to: usize, text: &str) -> Result<(), EditError> {
        self.document.replace(from, to, text)?;
        let inserted = text.len();
        self.caret = shift_position(self.caret, from, to, inserted);
        for range in self.markers.iter_mut().flatten() {
            // Text inserted right at a marker's start stays outside the marker.
            let start = if from == to && range.start == from {
                range.start + inserted
            } else {
                shift_position(range.start, from, to, inserted)
            };
            let end = shift_position(range.end, from, to, inserted);
            *range = start..end.max(start);
        }
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

    /// Apply a batch of non-overlapping edits computed against the current text.
    pub fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<(), EditError> {
        let mut edits = edits.to_vec();
        sort_for_application(&mut edits);
        for edit in &edits {
            self.replace(edit.range.start, edit.range.end, &edit.text)?;
        }
        Ok(())
    }

    /// Track `range` across later edits.
    pub fn create_range_marker(&mut self, range: Range<usize>) -> RangeMarkerId {
        self.markers.push(Some(range));
        RangeMarkerId(self.markers.len() - 1)
    }

    /// Current range of a marker, or `None` once released.
    pub fn range_marker(&self, id: RangeMarkerId) -> Option<Range<usize>> {
        self.markers.get(id.0).cloned().flatten()
    }

    /// Stop tracking a marker.
    pub fn release_range_marker(&mut self, id: RangeMarkerId) {
        if let Some(slot) = self.markers.get_mut(id.0) {
            *slot = None;
        }
        while matches!(self.markers.last(), Some(None)) {
            self.markers.pop();
        }
    }

    /// Store (`Some`) or clear (`None`) the value for `key`.
    pub fn put_user_data<T: Any>(&mut self, key: &Key<T>, value: Option<T>) {
        match value {
            Some(value) => {
                self.user_data.insert(key.name, Box::new(value));
            }
            None => {
                self.user_data.remove(key.name);
            }
        }
    }

    /// Value stored for `key`.
    pub fn user_data<T: Any>(&self, key: &Key<T>) -> Option<&T> {
        self.user_data
            .get(key.name)
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Insert a line break at the caret and indent the new line.
    ///
    /// The new line copies the current line's indentation, plus one level when the text
    /// before the caret ends with `{`. A `}` that directly follows the caret moves to its
    /// own line at the outer indentation.
    pub fn insert_newline(&mut self, style: &CodeStyle) -> Result<(), EditError> {
        let caret = self.caret;
        let line = self.document.line_of(caret);
        let before = self.document.slice(self.document.line_start(line)..caret)?;
        let after = self.document.slice(caret..self.document.line_end(line))?;
        let indent = self.document.line_indent(caret);

        let opens_block = before.trim_end().ends_with('{');
        let inner = if opens_block {
            format!("{indent}{}", style.indent_unit())
        } else {
            indent.clone()
        };
        let rest = after.trim_start_matches([' ', '\t']);
        let blanks = after.len() - rest.len();

        let text = if opens_block && rest.starts_with('}') {
            format!("\n{inner}\n{indent}")
        } else {
            format!("\n{inner}")
        };
        self.replace(caret, caret + blanks, &text)?;
        self.move_caret_to(caret + 1 + inner.len());
        Ok(())
    }

    /// The plain "start new line" action: go to the end of the caret's line, then
    /// [`Editor::insert_newline`].
    pub fn start_new_line(&mut self, style: &CodeStyle) -> Result<(), EditError> {
        let line_end = self.document.line_end(self.document.line_of(self.caret));
        self.move_caret_to(line_end);
        self.insert_newline(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_position() {
        assert_eq!(shift_position(3, 3, 3, 2), 3);
        assert_eq!(shift_position(4, 3, 3, 2), 6);
        assert_eq!(shift_position(5, 3, 7, 1), 4);
        assert_eq!(shift_position(8, 3, 7, 1), 5);
    }

    #[test]
    fn test_released_markers_are_compacted() {
        let mut editor = Editor::new("abc");
        let a = editor.create_range_marker(0..1);
        let b = editor.create_range_marker(1..2);
        editor.release_range_marker(b);
        editor.release_range_marker(a);
        assert!(editor.markers.is_empty());
        assert_eq!(editor.range_marker(a), None);
    }
}
