//! Branching history of snapshots with a movable cursor.

use super::checkpoint::Checkpoint;
use super::error::HistoryError;
use super::snapshot::Snapshot;
use crate::persist::{DefaultValue, PersistentValue};
use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Store keys for the two halves of a history log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryKeys {
    /// Key of the snapshot sequence
    pub snapshots: String,
    /// Key of the cursor
    pub cursor: String,
}

impl HistoryKeys {
    pub fn new(snapshots: impl Into<String>, cursor: impl Into<String>) -> Self {
        Self {
            snapshots: snapshots.into(),
            cursor: cursor.into(),
        }
    }

    /// `<prefix>:history` and `<prefix>:currentStep`.
    pub fn namespaced(prefix: &str) -> Self {
        Self::new(format!("{prefix}:history"), format!("{prefix}:currentStep"))
    }
}

/// Ordered, truncatable history with an explicit current position.
///
/// The snapshot sequence and the cursor are persisted separately, so a
/// reopened log comes back at the exact step the user was viewing, not
/// just at the latest snapshot.
///
/// Invariants: the sequence is never empty and the cursor always indexes
/// an element of it.
///
/// # Example
///
/// ```rust
/// use rewind::history::{HistoryKeys, HistoryLog};
/// use rewind::store::MemoryStore;
/// use std::sync::Arc;
///
/// let store = Arc::new(MemoryStore::new());
/// let mut log = HistoryLog::open(store, HistoryKeys::namespaced("doc"), "A".to_string()).unwrap();
///
/// log.append("B".to_string()).unwrap();
/// log.append("C".to_string()).unwrap();
/// log.jump_to(0).unwrap();
/// log.append("D".to_string()).unwrap();
///
/// // B and C were abandoned by branching from step 0
/// assert_eq!(log.snapshots(), ["A", "D"]);
/// assert_eq!(log.cursor(), 1);
/// ```
pub struct HistoryLog<S: Snapshot> {
    snapshots: PersistentValue<Vec<S>>,
    cursor: PersistentValue<usize>,
    initial: S,
}

impl<S: Snapshot> HistoryLog<S> {
    /// Open the log stored under `keys`, starting from `initial` if the
    /// store has nothing usable.
    ///
    /// A restored pair that violates the invariants is repaired and
    /// written back: an empty sequence becomes `[initial]` and a cursor
    /// past the end is clamped to the last step.
    pub fn open(store: Arc<dyn Store>, keys: HistoryKeys, initial: S) -> Result<Self, HistoryError> {
        let seed = initial.clone();
        let snapshots = PersistentValue::new(
            Arc::clone(&store),
            keys.snapshots,
            DefaultValue::producer(move || vec![seed.clone()]),
        );
        let cursor = PersistentValue::new(store, keys.cursor, 0usize);

        let mut log = Self {
            snapshots,
            cursor,
            initial,
        };
        log.repair()?;
        Ok(log)
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &S {
        &self.snapshots.read()[self.cursor()]
    }

    /// Index of the current snapshot.
    pub fn cursor(&self) -> usize {
        *self.cursor.read()
    }

    /// Number of snapshots, always at least one.
    pub fn len(&self) -> usize {
        self.snapshots.read().len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All snapshots in order; index 0 is the initial snapshot.
    pub fn snapshots(&self) -> &[S] {
        self.snapshots.read()
    }

    /// Snapshot at `step`, if it exists.
    pub fn get(&self, step: usize) -> Option<&S> {
        self.snapshots.read().get(step)
    }

    /// Check if the cursor is on the newest snapshot.
    pub fn is_at_latest(&self) -> bool {
        self.cursor() + 1 == self.len()
    }

    /// Store key of the snapshot sequence.
    pub fn snapshots_key(&self) -> &str {
        self.snapshots.key()
    }

    /// Store key of the cursor.
    pub fn cursor_key(&self) -> &str {
        self.cursor.key()
    }

    /// Append `next` after the cursor and move the cursor onto it.
    ///
    /// Snapshots after the cursor are discarded first, so appending from
    /// a rewound position permanently abandons the old future.
    pub fn append(&mut self, next: S) -> Result<(), HistoryError> {
        let cursor = self.cursor();
        let len = self.len();

        let mut branch = self.snapshots.read()[..=cursor].to_vec();
        branch.push(next);
        let new_cursor = branch.len() - 1;

        self.commit(branch, new_cursor)?;

        let discarded = len - cursor - 1;
        if discarded > 0 {
            debug!(
                "Branched at step {} of '{}', discarded {} snapshots",
                cursor,
                self.snapshots.key(),
                discarded
            );
        }
        Ok(())
    }

    /// Move the cursor to `step` without touching the snapshots.
    pub fn jump_to(&mut self, step: usize) -> Result<(), HistoryError> {
        let len = self.len();
        if step >= len {
            return Err(HistoryError::OutOfRange { step, len });
        }
        self.cursor.write(step)?;
        Ok(())
    }

    /// Discard all history and start again from `initial`.
    pub fn reset(&mut self, initial: S) -> Result<(), HistoryError> {
        self.commit(vec![initial.clone()], 0)?;
        self.initial = initial;
        Ok(())
    }

    /// Move both store entries to `keys`.
    pub fn rebind(&mut self, keys: HistoryKeys) -> Result<(), HistoryError> {
        let previous = self.snapshots.key().to_string();
        self.snapshots.rebind(keys.snapshots)?;
        if let Err(e) = self.cursor.rebind(keys.cursor) {
            if let Err(undo) = self.snapshots.rebind(previous) {
                warn!("Could not move snapshots back after failed rebind: {}", undo);
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Capture the whole log as a versioned checkpoint.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        Checkpoint::new(self.snapshots().to_vec(), self.cursor())
    }

    /// Replace the log with the contents of `checkpoint`.
    ///
    /// The checkpoint is validated first; an invalid one leaves the log
    /// unchanged.
    pub fn restore(&mut self, checkpoint: Checkpoint<S>) -> Result<(), HistoryError> {
        checkpoint.validate()?;
        debug!(
            "Restoring '{}' from checkpoint {} ({} snapshots)",
            self.snapshots.key(),
            checkpoint.id,
            checkpoint.snapshots.len()
        );
        self.commit(checkpoint.snapshots, checkpoint.cursor)
    }

    /// Write a new sequence and cursor, undoing the sequence write if the
    /// cursor write fails.
    ///
    /// The in-memory log is always left as it was on error. If the store
    /// entry cannot be rolled back either, the store holds the new sequence
    /// with the old cursor until the next commit; [`open`](Self::open)
    /// repairs such a pair.
    fn commit(&mut self, snapshots: Vec<S>, cursor: usize) -> Result<(), HistoryError> {
        let previous = self.snapshots.read().clone();
        self.snapshots.write(snapshots)?;
        if let Err(e) = self.cursor.write(cursor) {
            if let Err(undo) = self.snapshots.write(previous.clone()) {
                warn!(
                    "Could not roll back '{}' after failed cursor write: {}",
                    self.snapshots.key(),
                    undo
                );
                self.snapshots.restore_in_memory(previous);
            }
            return Err(e.into());
        }
        Ok(())
    }

    fn repair(&mut self) -> Result<(), HistoryError> {
        if self.snapshots.read().is_empty() {
            warn!(
                "Stored history '{}' is empty, starting from the initial snapshot",
                self.snapshots.key()
            );
            self.snapshots.write(vec![self.initial.clone()])?;
        }

        let last = self.len() - 1;
        let cursor = self.cursor();
        if cursor > last {
            warn!(
                "Stored cursor {} of '{}' is past the last step {}, clamping",
                cursor,
                self.cursor.key(),
                last
            );
            self.cursor.write(last)?;
        }
        Ok(())
    }
}

impl<S: Snapshot> std::fmt::Debug for HistoryLog<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryLog")
            .field("snapshots", &self.snapshots())
            .field("cursor", &self.cursor())
            .finish()
    }
}
