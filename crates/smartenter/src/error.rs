//! Error type of the engine.

use smartenter_core::EditError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while repairing a statement.
pub enum SmartEnterError {
    #[error("incorrect tree operation: {0}")]
    /// The tree and the text it was parsed from disagree.
    IncorrectTreeOperation(String),

    #[error("edit failed: {0}")]
    /// A document edit was rejected.
    Edit(#[from] EditError),

    #[error("smart enter session stamp is missing")]
    /// The per-session modification stamp was read outside a session.
    SessionStampMissing,

    #[error("invalid configuration: {0}")]
    /// A JSON configuration could not be parsed.
    Config(#[from] serde_json::Error),
}
