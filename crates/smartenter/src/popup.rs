//! Yielding to code completion.

/// A code-completion popup the engine must yield to.
///
/// Polled before and after every fixer; once it reports active, the invocation stops
/// without further edits.
pub trait CompletionPopup {
    /// Whether the popup is currently shown.
    fn is_active(&self) -> bool;
}

/// An editor without completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPopup;

impl CompletionPopup for NoPopup {
    fn is_active(&self) -> bool {
        false
    }
}

impl<F: Fn() -> bool> CompletionPopup for F {
    fn is_active(&self) -> bool {
        self()
    }
}
