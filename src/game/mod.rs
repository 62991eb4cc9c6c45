//! Tic-tac-toe with a time-travel move log.
//!
//! - [`Board`]: one immutable snapshot of the nine cells
//! - [`rules`]: pure functions deriving the next mover, winner and status
//! - [`apply_move`] / [`restart`]: engine operations on a
//!   [`HistoryLog`](crate::history::HistoryLog) of boards
//! - [`Game`]: a persisted session for a front end to drive

mod board;
mod config;
mod engine;
pub mod error;
pub mod rules;

pub use board::{Board, Mark, CELLS};
pub use config::{GameConfig, DEFAULT_NAMESPACE};
pub use engine::{apply_move, restart, Game, MoveEntry};
pub use error::{GameError, IllegalMoveReason};
pub use rules::{GameStatus, MoveLegality};
