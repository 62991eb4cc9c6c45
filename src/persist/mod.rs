//! Values mirrored into a durable store.
//!
//! A [`PersistentValue`] owns one logical value and keeps the store entry
//! under its key in step with it:
//!
//! - **Lazy load**: the store is read once, at the first read
//! - **Write-through**: every write is stored before it returns
//! - **Key migration**: [`PersistentValue::rebind`] moves the entry
//! - **Recovery**: malformed entries are dropped in favour of the default
//!
//! Encoding is pluggable through [`Codec`]; [`JsonCodec`] is the default.

mod builder;
mod codec;
mod default;
pub mod error;
mod value;

pub use builder::PersistentValueBuilder;
pub use codec::{Codec, FnCodec, JsonCodec};
pub use default::DefaultValue;
pub use error::{BuildError, CodecError, PersistError};
pub use value::{LoadOutcome, PersistentValue};
