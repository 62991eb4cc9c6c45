//! In-memory store.

use super::{Store, StoreError};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Store backed by an in-memory `BTreeMap`.
///
/// Nothing survives the process, which makes it the store of choice for
/// tests. Sharing one instance through an `Arc` between several bindings
/// simulates a page reload: drop the bindings, keep the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// All keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.read().contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
        assert!(!store.contains("missing").unwrap());
    }

    #[test]
    fn set_then_get_returns_value() {
        let store = MemoryStore::new();
        store.set("name", "\"Ada\"").unwrap();

        assert_eq!(store.get("name").unwrap().as_deref(), Some("\"Ada\""));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_overwrites_previous_entry() {
        let store = MemoryStore::new();
        store.set("count", "1").unwrap();
        store.set("count", "2").unwrap();

        assert_eq!(store.get("count").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_deletes_only_that_key() {
        let store = MemoryStore::with_entries([("a", "1"), ("b", "2")]);
        store.remove("a").unwrap();
        store.remove("never-existed").unwrap();

        assert_eq!(store.keys(), vec!["b".to_string()]);
    }
}
