//! Builder for constructing persisted values.

use super::codec::{Codec, JsonCodec};
use super::default::DefaultValue;
use super::error::BuildError;
use super::value::PersistentValue;
use crate::store::Store;
use std::sync::Arc;

/// Builder for [`PersistentValue`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use rewind::persist::PersistentValueBuilder;
/// use rewind::store::MemoryStore;
/// use std::sync::Arc;
///
/// let value = PersistentValueBuilder::<Vec<String>>::new()
///     .key("todo:items")
///     .default_with(Vec::new)
///     .build(Arc::new(MemoryStore::new()))
///     .unwrap();
///
/// assert!(value.read().is_empty());
/// ```
pub struct PersistentValueBuilder<T, C = JsonCodec> {
    key: Option<String>,
    default: Option<DefaultValue<T>>,
    codec: C,
}

impl<T> PersistentValueBuilder<T, JsonCodec> {
    /// Create a new builder using the JSON codec.
    pub fn new() -> Self {
        Self {
            key: None,
            default: None,
            codec: JsonCodec,
        }
    }
}

impl<T> Default for PersistentValueBuilder<T, JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, C: Codec<T>> PersistentValueBuilder<T, C> {
    /// Set the storage key (required).
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Use a literal default.
    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(DefaultValue::Literal(value));
        self
    }

    /// Use a producer function as the default.
    pub fn default_with<F>(mut self, f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::producer(f));
        self
    }

    /// Swap the codec.
    pub fn codec<C2: Codec<T>>(self, codec: C2) -> PersistentValueBuilder<T, C2> {
        PersistentValueBuilder {
            key: self.key,
            default: self.default,
            codec,
        }
    }

    /// Build the value bound to `store`.
    /// Returns an error if required fields are missing.
    pub fn build(self, store: Arc<dyn Store>) -> Result<PersistentValue<T, C>, BuildError> {
        let key = self.key.ok_or(BuildError::MissingKey)?;
        if key.is_empty() {
            return Err(BuildError::EmptyKey);
        }
        let default = self.default.ok_or(BuildError::MissingDefault)?;

        Ok(PersistentValue::with_codec(store, key, default, self.codec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{CodecError, FnCodec};
    use crate::store::MemoryStore;

    fn store() -> Arc<dyn Store> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = PersistentValueBuilder::<u32>::new().build(store());
        assert!(matches!(result, Err(BuildError::MissingKey)));

        let result = PersistentValueBuilder::<u32>::new().key("n").build(store());
        assert!(matches!(result, Err(BuildError::MissingDefault)));
    }

    #[test]
    fn builder_rejects_empty_key() {
        let result = PersistentValueBuilder::<u32>::new()
            .key("")
            .default_value(0)
            .build(store());

        assert!(matches!(result, Err(BuildError::EmptyKey)));
    }

    #[test]
    fn builder_creates_value() {
        let value = PersistentValueBuilder::<u32>::new()
            .key("n")
            .default_value(4)
            .build(store())
            .unwrap();

        assert_eq!(value.key(), "n");
        assert_eq!(*value.read(), 4);
    }

    #[test]
    fn builder_accepts_custom_codec() {
        let backing = Arc::new(MemoryStore::new());
        let mut value = PersistentValueBuilder::<bool>::new()
            .key("flag")
            .default_value(false)
            .codec(FnCodec::new(
                |b: &bool| (if *b { "yes" } else { "no" }).to_string(),
                |raw: &str| match raw {
                    "yes" => Ok(true),
                    "no" => Ok(false),
                    other => Err(CodecError(format!("unexpected '{other}'"))),
                },
            ))
            .build(backing.clone())
            .unwrap();

        value.write(true).unwrap();
        assert_eq!(backing.get("flag").unwrap().as_deref(), Some("yes"));
    }
}
