//! Branching, persisted history.
//!
//! This module contains the time-travel log:
//! - [`Snapshot`]: bound for values kept in a log
//! - [`HistoryLog`]: snapshot sequence plus cursor, each persisted under
//!   its own key
//! - [`Checkpoint`]: versioned capture of a whole log

mod checkpoint;
pub mod error;
mod log;
mod snapshot;

pub use checkpoint::{Checkpoint, CHECKPOINT_VERSION};
pub use error::HistoryError;
pub use log::{HistoryKeys, HistoryLog};
pub use snapshot::Snapshot;
