//! Durable key/value storage used as the persistence backend.
//!
//! A store maps opaque string keys to serialized string values. It knows
//! nothing about the values it holds; encoding is the job of a
//! [`Codec`](crate::persist::Codec). Keys are not namespaced, so callers
//! pick collision-free names such as `"tic-tac-toe:history"`.
//!
//! Implementations:
//! - [`MemoryStore`]: in-memory map for tests and ephemeral sessions
//! - [`FileStore`]: a single JSON document on disk

pub mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::{FileStore, FileStoreConfig};
pub use memory::MemoryStore;

use std::sync::Arc;

/// Abstraction over a durable string key/value map.
///
/// Every call touches exactly one key. Writers to the same key from
/// outside this process are not coordinated.
pub trait Store: Send + Sync {
    /// Get the raw string stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the entry under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Check if a key exists.
    ///
    /// Default implementation uses `get()`, but backends may optimize this.
    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        (**self).contains(key)
    }
}
