//! Versioned, self-contained captures of a history log.
//!
//! A checkpoint carries the full snapshot sequence and the cursor in one
//! document, for export, backup, or moving a session between stores.

use super::error::HistoryError;
use super::snapshot::Snapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable capture of a history log.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: Snapshot> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub created_at: DateTime<Utc>,

    /// Complete snapshot sequence
    pub snapshots: Vec<S>,

    /// Cursor position at capture time
    pub cursor: usize,
}

impl<S: Snapshot> Checkpoint<S> {
    /// Capture `snapshots` and `cursor` under a fresh id.
    pub fn new(snapshots: Vec<S>, cursor: usize) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            snapshots,
            cursor,
        }
    }

    /// Check version and log invariants.
    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(HistoryError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if self.snapshots.is_empty() {
            return Err(HistoryError::InvalidCheckpoint(
                "snapshot sequence is empty".to_string(),
            ));
        }
        if self.cursor >= self.snapshots.len() {
            return Err(HistoryError::InvalidCheckpoint(format!(
                "cursor {} outside {} snapshots",
                self.cursor,
                self.snapshots.len()
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, HistoryError> {
        serde_json::to_string(self).map_err(|e| HistoryError::SerializationFailed(e.to_string()))
    }

    /// Decode and validate a checkpoint.
    pub fn from_json(raw: &str) -> Result<Self, HistoryError> {
        let checkpoint: Self = serde_json::from_str(raw)
            .map_err(|e| HistoryError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checkpoint_is_valid() {
        let checkpoint = Checkpoint::new(vec![1u8, 2, 3], 2);

        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert!(Uuid::parse_str(&checkpoint.id).is_ok());
        assert!(checkpoint.validate().is_ok());
    }

    #[test]
    fn json_preserves_contents() {
        let checkpoint = Checkpoint::new(vec!["a".to_string(), "b".to_string()], 0);

        let json = checkpoint.to_json().unwrap();
        let decoded: Checkpoint<String> = Checkpoint::from_json(&json).unwrap();

        assert_eq!(decoded.id, checkpoint.id);
        assert_eq!(decoded.snapshots, checkpoint.snapshots);
        assert_eq!(decoded.cursor, 0);
    }

    #[test]
    fn future_version_is_rejected() {
        let mut checkpoint = Checkpoint::new(vec![0u8], 0);
        checkpoint.version = CHECKPOINT_VERSION + 1;

        assert!(matches!(
            checkpoint.validate(),
            Err(HistoryError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let checkpoint: Checkpoint<u8> = Checkpoint::new(Vec::new(), 0);
        assert!(matches!(
            checkpoint.validate(),
            Err(HistoryError::InvalidCheckpoint(_))
        ));
    }

    #[test]
    fn garbage_json_is_a_deserialization_error() {
        let result: Result<Checkpoint<u8>, _> = Checkpoint::from_json("{\"version\":1}");
        assert!(matches!(result, Err(HistoryError::DeserializationFailed(_))));
    }
}
