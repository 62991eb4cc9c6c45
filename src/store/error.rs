//! Store error types.

use thiserror::Error;

/// Errors raised by a [`Store`](super::Store) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed
    #[error("Store I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing document could not be encoded or decoded
    #[error("Store document encoding failed: {0}")]
    Encoding(String),
}
