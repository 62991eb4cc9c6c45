//! A single value mirrored into a store under a key.

use super::codec::{Codec, JsonCodec};
use super::default::DefaultValue;
use super::error::PersistError;
use crate::store::Store;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::{Cell, OnceCell};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the in-memory value came from at its first read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Decoded from the store entry
    Stored,
    /// No entry (or an empty one); the default was used
    Defaulted,
    /// The entry was malformed; it was discarded and the default used
    Recovered,
    /// The store could not be read; the default was used
    Unavailable,
}

/// A value synchronized to a [`Store`] under a named key.
///
/// The first [`read`](Self::read) loads the value, either by decoding the
/// store entry or by resolving the default, and memoizes it. The store is
/// never consulted for this key again except by [`rebind`](Self::rebind).
/// Every mutation writes through to the store before it returns.
///
/// # Example
///
/// ```rust
/// use rewind::persist::PersistentValue;
/// use rewind::store::{MemoryStore, Store};
/// use std::sync::Arc;
///
/// let store = Arc::new(MemoryStore::new());
/// let mut name = PersistentValue::new(store.clone(), "name", String::new());
///
/// assert_eq!(name.read(), "");
/// name.write("Ada".to_string()).unwrap();
/// assert_eq!(store.get("name").unwrap().as_deref(), Some("\"Ada\""));
///
/// name.rebind("greeting:name").unwrap();
/// assert!(!store.contains("name").unwrap());
/// assert_eq!(store.get("greeting:name").unwrap().as_deref(), Some("\"Ada\""));
/// ```
pub struct PersistentValue<T, C = JsonCodec> {
    key: String,
    store: Arc<dyn Store>,
    codec: C,
    default: DefaultValue<T>,
    value: OnceCell<T>,
    outcome: Cell<Option<LoadOutcome>>,
}

impl<T: Serialize + DeserializeOwned + Clone> PersistentValue<T, JsonCodec> {
    /// Bind `key` in `store` using the JSON codec.
    pub fn new(
        store: Arc<dyn Store>,
        key: impl Into<String>,
        default: impl Into<DefaultValue<T>>,
    ) -> Self {
        Self::with_codec(store, key, default, JsonCodec)
    }
}

impl<T: Clone, C: Codec<T>> PersistentValue<T, C> {
    /// Bind `key` in `store` using a custom codec.
    pub fn with_codec(
        store: Arc<dyn Store>,
        key: impl Into<String>,
        default: impl Into<DefaultValue<T>>,
        codec: C,
    ) -> Self {
        Self {
            key: key.into(),
            store,
            codec,
            default: default.into(),
            value: OnceCell::new(),
            outcome: Cell::new(None),
        }
    }

    /// The key this value is currently stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Check whether the first read has happened.
    pub fn is_loaded(&self) -> bool {
        self.value.get().is_some()
    }

    /// How the value was obtained at its first read.
    ///
    /// `None` if the value has not been read yet, or if it was written
    /// before ever being read.
    pub fn load_outcome(&self) -> Option<LoadOutcome> {
        self.outcome.get()
    }

    /// Current in-memory value.
    ///
    /// The first call loads it (see the type docs); later calls never
    /// touch the store.
    pub fn read(&self) -> &T {
        self.value.get_or_init(|| {
            let (value, outcome) = self.load();
            self.outcome.set(Some(outcome));
            value
        })
    }

    /// Replace the value and write it to the store.
    ///
    /// On error neither the store entry nor the in-memory value changes.
    pub fn write(&mut self, value: T) -> Result<(), PersistError> {
        let raw = self.encode(&value)?;
        self.store.set(&self.key, &raw)?;
        self.value = OnceCell::from(value);
        Ok(())
    }

    /// Put `value` back in memory without touching the store.
    ///
    /// Used to undo an in-memory change after the store entry could not
    /// be restored; the two may disagree until the next successful write.
    pub(crate) fn restore_in_memory(&mut self, value: T) {
        self.value = OnceCell::from(value);
    }

    /// Read-modify-write in one step.
    pub fn update<F>(&mut self, f: F) -> Result<(), PersistError>
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(self.read());
        self.write(next)
    }

    /// Move the stored entry to `new_key`.
    ///
    /// Writes the current value under `new_key` and removes the entry at
    /// the old key. A no-op if the key is unchanged.
    ///
    /// If removing the old entry fails, the new entry is removed again and
    /// the key stays unchanged. Should that removal fail too, the error is
    /// still returned but both keys hold a copy of the value.
    pub fn rebind(&mut self, new_key: impl Into<String>) -> Result<(), PersistError> {
        let new_key = new_key.into();
        if new_key == self.key {
            return Ok(());
        }

        // Loads from the old key if nothing has been read yet
        let raw = self.encode(self.read())?;
        self.store.set(&new_key, &raw)?;
        if let Err(e) = self.store.remove(&self.key) {
            if let Err(undo) = self.store.remove(&new_key) {
                warn!("Could not undo partial migration to '{}': {}", new_key, undo);
            }
            return Err(e.into());
        }

        info!("Migrated persisted value from '{}' to '{}'", self.key, new_key);
        self.key = new_key;
        Ok(())
    }

    /// Write the current value to the store again.
    pub fn sync(&self) -> Result<(), PersistError> {
        let raw = self.encode(self.read())?;
        self.store.set(&self.key, &raw)?;
        Ok(())
    }

    /// Decode whatever is stored under the key right now, bypassing the
    /// in-memory value.
    pub fn peek_stored(&self) -> Result<Option<T>, PersistError> {
        match self.store.get(&self.key)? {
            Some(raw) if !raw.is_empty() => self
                .codec
                .deserialize(&raw)
                .map(Some)
                .map_err(|source| PersistError::Deserialization {
                    key: self.key.clone(),
                    source,
                }),
            _ => Ok(None),
        }
    }

    /// Consume the binding, returning the current value.
    pub fn into_value(self) -> T {
        self.read();
        let Self { value, default, .. } = self;
        value.into_inner().unwrap_or_else(|| default.resolve())
    }

    fn encode(&self, value: &T) -> Result<String, PersistError> {
        self.codec
            .serialize(value)
            .map_err(|source| PersistError::Serialization {
                key: self.key.clone(),
                source,
            })
    }

    fn load(&self) -> (T, LoadOutcome) {
        match self.store.get(&self.key) {
            Ok(Some(raw)) if !raw.is_empty() => match self.codec.deserialize(&raw) {
                Ok(value) => {
                    debug!("Loaded '{}' from store", self.key);
                    (value, LoadOutcome::Stored)
                }
                Err(e) => {
                    warn!("Discarding malformed entry for '{}': {}", self.key, e);
                    if let Err(e) = self.store.remove(&self.key) {
                        warn!("Could not remove malformed entry '{}': {}", self.key, e);
                    }
                    (self.default.resolve(), LoadOutcome::Recovered)
                }
            },
            Ok(_) => {
                debug!("No stored entry for '{}', using default", self.key);
                (self.default.resolve(), LoadOutcome::Defaulted)
            }
            Err(e) => {
                warn!("Store read failed for '{}', using default: {}", self.key, e);
                (self.default.resolve(), LoadOutcome::Unavailable)
            }
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PersistentValue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentValue")
            .field("key", &self.key)
            .field("value", &self.value.get())
            .field("outcome", &self.outcome.get())
            .finish_non_exhaustive()
    }
}
