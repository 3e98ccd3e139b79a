//! Scope guard holding the document stamp for the duration of one invocation.

use std::ops::{Deref, DerefMut};

use smartenter_core::{Editor, Key};

use crate::SmartEnterError;

/// User-data slot holding the document stamp taken when an invocation starts.
pub const SMART_ENTER_STAMP: Key<u64> = Key::new("smart_enter.original_stamp");

/// Exclusive access to an editor for one Smart-Enter invocation.
///
/// Creating a session stores the current modification stamp under
/// [`SMART_ENTER_STAMP`]; dropping it clears the slot again, on every exit path
/// including unwinding.
pub struct Session<'a> {
    editor: &'a mut Editor,
}

impl<'a> Session<'a> {
    /// Start a session and record the document's stamp.
    pub fn begin(editor: &'a mut Editor) -> Self {
        let stamp = editor.document().modification_stamp();
        editor.put_user_data(&SMART_ENTER_STAMP, Some(stamp));
        Self { editor }
    }

    /// The stamp recorded when the session began.
    pub fn original_stamp(&self) -> Result<u64, SmartEnterError> {
        self.editor
            .user_data(&SMART_ENTER_STAMP)
            .copied()
            .ok_or(SmartEnterError::SessionStampMissing)
    }

    /// Whether the document changed since the session began.
    pub fn is_modified(&self) -> Result<bool, SmartEnterError> {
        Ok(self.editor.document().modification_stamp() != self.original_stamp()?)
    }
}

impl Deref for Session<'_> {
    type Target = Editor;

    fn deref(&self) -> &Editor {
        self.editor
    }
}

impl DerefMut for Session<'_> {
    fn deref_mut(&mut self) -> &mut Editor {
        self.editor
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.editor.put_user_data(&SMART_ENTER_STAMP, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_lives_as_long_as_the_session() {
        let mut editor = Editor::new("x");
        {
            let mut session = Session::begin(&mut editor);
            assert!(!session.is_modified().unwrap());
            session.insert(1, ";").unwrap();
            assert!(session.is_modified().unwrap());
        }
        assert_eq!(editor.user_data(&SMART_ENTER_STAMP), None);
    }

    #[test]
    fn test_missing_stamp_is_an_error() {
        let mut editor = Editor::new("x");
        let mut session = Session::begin(&mut editor);
        session.editor.put_user_data(&SMART_ENTER_STAMP, None);
        assert!(matches!(
            session.is_modified(),
            Err(SmartEnterError::SessionStampMissing)
        ));
    }
}
