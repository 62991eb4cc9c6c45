//! Game error types.

use crate::history::HistoryError;
use thiserror::Error;

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMoveReason {
    #[error("cell is already occupied")]
    Occupied,

    #[error("the game is already over")]
    GameOver,

    #[error("cell index is outside the board")]
    OutOfBounds,
}

/// Errors that can occur while playing
#[derive(Debug, Error)]
pub enum GameError {
    /// The move was refused; nothing was recorded
    #[error("Illegal move at cell {cell}: {reason}")]
    IllegalMove {
        cell: usize,
        reason: IllegalMoveReason,
    },

    /// A board literal could not be parsed
    #[error("Invalid board '{input}': {message}")]
    InvalidBoard { input: String, message: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    History(#[from] HistoryError),
}
