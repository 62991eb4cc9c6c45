//! Bound shared by every value kept in a history log.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for history snapshots.
///
/// Snapshots are immutable values: a log never edits one in place, it
/// appends a new one. Implemented automatically for every type meeting
/// the bounds.
///
/// # Required Traits
///
/// - `Clone`: branching copies the retained prefix
/// - `PartialEq`: snapshots must be comparable for tests and diagnostics
/// - `Debug`: snapshots must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: snapshots are persisted
pub trait Snapshot:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
}

impl<T> Snapshot for T where
    T: Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
}
