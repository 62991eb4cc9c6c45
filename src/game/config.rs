//! Game configuration.

use super::error::GameError;
use crate::history::HistoryKeys;
use serde::{Deserialize, Serialize};

/// Prefix of the default store keys.
pub const DEFAULT_NAMESPACE: &str = "tic-tac-toe";

/// Where a game keeps its history in the store.
///
/// Missing fields fall back to the defaults when deserializing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Key of the board sequence
    pub history_key: String,

    /// Key of the viewed step
    pub step_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::namespaced(DEFAULT_NAMESPACE)
    }
}

impl GameConfig {
    /// Keys `<prefix>:history` and `<prefix>:currentStep`.
    pub fn namespaced(prefix: &str) -> Self {
        let keys = HistoryKeys::namespaced(prefix);
        Self {
            history_key: keys.snapshots,
            step_key: keys.cursor,
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self, GameError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Keys must be non-empty and distinct.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.history_key.is_empty() || self.step_key.is_empty() {
            return Err(GameError::InvalidConfig(
                "store keys must not be empty".to_string(),
            ));
        }
        if self.history_key == self.step_key {
            return Err(GameError::InvalidConfig(format!(
                "history and step share the key '{}'",
                self.history_key
            )));
        }
        Ok(())
    }

    pub fn keys(&self) -> HistoryKeys {
        HistoryKeys::new(self.history_key.clone(), self.step_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_tic_tac_toe_keys() {
        let config = GameConfig::default();
        assert_eq!(config.history_key, "tic-tac-toe:history");
        assert_eq!(config.step_key, "tic-tac-toe:currentStep");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{"history_key":"room-7:history"}"#).unwrap();

        assert_eq!(config.history_key, "room-7:history");
        assert_eq!(config.step_key, "tic-tac-toe:currentStep");
    }

    #[test]
    fn shared_key_is_rejected() {
        let result = GameConfig::from_json_str(r#"{"history_key":"k","step_key":"k"}"#);
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            GameConfig::from_json_str("{"),
            Err(GameError::InvalidConfig(_))
        ));
    }
}
