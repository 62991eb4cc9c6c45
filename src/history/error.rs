//! History error types.

use crate::persist::PersistError;
use thiserror::Error;

/// Errors that can occur while navigating or mutating a history log
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Requested step does not index an existing snapshot
    #[error("Step {step} is out of range for a history of {len} snapshots")]
    OutOfRange { step: usize, len: usize },

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint data failed validation
    #[error("Checkpoint validation failed: {0}")]
    InvalidCheckpoint(String),

    /// Checkpoint could not be encoded
    #[error("Checkpoint serialization failed: {0}")]
    SerializationFailed(String),

    /// Checkpoint could not be decoded
    #[error("Checkpoint deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error(transparent)]
    Persist(#[from] PersistError),
}
