//! Pluggable serialization for persisted values.

use super::error::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Serializer/deserializer pair used to mirror a value into a store.
///
/// Implementations must round-trip: `deserialize(serialize(x)) == x` for
/// every value the binding can reach.
pub trait Codec<T>: Send + Sync {
    fn serialize(&self, value: &T) -> Result<String, CodecError>;

    fn deserialize(&self, raw: &str) -> Result<T, CodecError>;
}

/// Structural JSON encoding via `serde_json`. The default codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec;

impl<T: Serialize + DeserializeOwned> Codec<T> for JsonCodec {
    fn serialize(&self, value: &T) -> Result<String, CodecError> {
        serde_json::to_string(value).map_err(|e| CodecError(e.to_string()))
    }

    fn deserialize(&self, raw: &str) -> Result<T, CodecError> {
        serde_json::from_str(raw).map_err(|e| CodecError(e.to_string()))
    }
}

type SerializeFn<T> = Box<dyn Fn(&T) -> String + Send + Sync>;
type DeserializeFn<T> = Box<dyn Fn(&str) -> Result<T, CodecError> + Send + Sync>;

/// Codec built from a pair of closures.
///
/// # Example
///
/// ```rust
/// use rewind::persist::{Codec, CodecError, FnCodec};
///
/// let codec = FnCodec::new(
///     |n: &u32| n.to_string(),
///     |raw: &str| raw.parse::<u32>().map_err(|e| CodecError(e.to_string())),
/// );
///
/// assert_eq!(codec.serialize(&7).unwrap(), "7");
/// assert_eq!(codec.deserialize("7").unwrap(), 7);
/// assert!(codec.deserialize("seven").is_err());
/// ```
pub struct FnCodec<T> {
    serialize: SerializeFn<T>,
    deserialize: DeserializeFn<T>,
}

impl<T> FnCodec<T> {
    pub fn new<S, D>(serialize: S, deserialize: D) -> Self
    where
        S: Fn(&T) -> String + Send + Sync + 'static,
        D: Fn(&str) -> Result<T, CodecError> + Send + Sync + 'static,
    {
        Self {
            serialize: Box::new(serialize),
            deserialize: Box::new(deserialize),
        }
    }
}

impl<T> Codec<T> for FnCodec<T> {
    fn serialize(&self, value: &T) -> Result<String, CodecError> {
        Ok((self.serialize)(value))
    }

    fn deserialize(&self, raw: &str) -> Result<T, CodecError> {
        (self.deserialize)(raw)
    }
}

impl<T> fmt::Debug for FnCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCodec").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn json_codec_uses_plain_json() {
        let codec = JsonCodec;
        let raw = Codec::<Vec<Option<String>>>::serialize(
            &codec,
            &vec![None, Some("X".to_string())],
        )
        .unwrap();

        assert_eq!(raw, r#"[null,"X"]"#);
    }

    #[test]
    fn json_codec_rejects_malformed_input() {
        let result: Result<BTreeMap<String, u8>, _> = JsonCodec.deserialize("{\"a\":");
        assert!(result.is_err());
    }

    #[test]
    fn json_codec_rejects_wrong_shape() {
        let result: Result<usize, _> = JsonCodec.deserialize("\"three\"");
        assert!(result.is_err());
    }

    #[test]
    fn fn_codec_delegates_to_closures() {
        let codec = FnCodec::new(
            |s: &String| s.to_uppercase(),
            |raw: &str| Ok(raw.to_lowercase()),
        );

        assert_eq!(codec.serialize(&"ada".to_string()).unwrap(), "ADA");
        assert_eq!(codec.deserialize("ADA").unwrap(), "ada");
    }
}
