//! Offset of the first hole the fixers left open.

use tracing::trace;

/// The smallest offset of a syntactic hole that a fixer refused to fill.
///
/// `None` plays the role of "no error"; registering only ever lowers the stored value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ErrorRegistry {
    first: Option<usize>,
}

impl ErrorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hole at `offset`, keeping the minimum.
    pub fn register(&mut self, offset: usize) {
        trace!(offset, "unresolved error registered");
        self.first = Some(self.first.map_or(offset, |first| first.min(offset)));
    }

    /// The smallest registered offset.
    pub fn first_error_offset(&self) -> Option<usize> {
        self.first
    }

    /// Whether nothing has been registered since the last reset.
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Forget every registered offset.
    pub fn reset(&mut self) {
        self.first = None;
    }

    /// Return the smallest offset and reset.
    pub fn take(&mut self) -> Option<usize> {
        self.first.take()
    }
}
