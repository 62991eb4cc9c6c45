//! Persistence error types.

use crate::store::StoreError;
use thiserror::Error;

/// Failure reported by a [`Codec`](super::Codec).
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{0}")]
pub struct CodecError(pub String);

/// Errors that can occur while synchronizing a persisted value
#[derive(Debug, Error)]
pub enum PersistError {
    /// The in-memory value could not be encoded
    #[error("Serialization failed for '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: CodecError,
    },

    /// A stored string could not be decoded.
    ///
    /// Never returned from a read: malformed entries fall back to the
    /// default value. Surfaces only from explicit decoding such as
    /// [`PersistentValue::peek_stored`](super::PersistentValue::peek_stored).
    #[error("Deserialization failed for '{key}': {source}")]
    Deserialization {
        key: String,
        #[source]
        source: CodecError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that can occur when building a persisted value.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Storage key not specified. Call .key(name) before .build()")]
    MissingKey,

    #[error("Storage key must not be empty")]
    EmptyKey,

    #[error("Default value not specified. Call .default_value(v) or .default_with(f)")]
    MissingDefault,
}
