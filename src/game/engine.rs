//! Move application on top of a history log.

use super::board::Board;
use super::config::GameConfig;
use super::error::GameError;
use super::rules::{self, GameStatus, MoveLegality};
use crate::history::HistoryLog;
use crate::store::Store;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Place the next mover's mark at `cell` on the current board and append
/// the result to `log`.
///
/// An illegal move records nothing and returns
/// [`GameError::IllegalMove`].
pub fn apply_move(log: &mut HistoryLog<Board>, cell: usize) -> Result<Board, GameError> {
    let current = *log.current();
    if let MoveLegality::Illegal(reason) = rules::legal_move(&current, cell) {
        debug!("Rejected move at cell {}: {}", cell, reason);
        return Err(GameError::IllegalMove { cell, reason });
    }

    let next = current.with_mark(cell, rules::next_mover(&current));
    log.append(next)?;
    Ok(next)
}

/// Discard all history and start over from `empty`.
pub fn restart(log: &mut HistoryLog<Board>, empty: Board) -> Result<(), GameError> {
    log.reset(empty)?;
    Ok(())
}

/// One row of the "go to move" list handed to a renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveEntry {
    pub step: usize,
    pub label: String,
    pub is_current: bool,
}

impl MoveEntry {
    fn new(step: usize, is_current: bool) -> Self {
        let label = if step == 0 {
            "Go to game start!".to_string()
        } else {
            format!("Go to move #{step}")
        };
        Self {
            step,
            label,
            is_current,
        }
    }
}

impl fmt::Display for MoveEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)?;
        if self.is_current {
            f.write_str(" (current)")?;
        }
        Ok(())
    }
}

/// A persisted tic-tac-toe session.
///
/// Owns the board history and exposes the operations a front end calls
/// in response to input. Reopening a session on the same store resumes
/// at the exact move that was being viewed.
///
/// # Example
///
/// ```rust
/// use rewind::game::{Game, GameConfig, GameStatus, Mark};
/// use rewind::store::MemoryStore;
/// use std::sync::Arc;
///
/// let store = Arc::new(MemoryStore::new());
/// let mut game = Game::open(store, &GameConfig::default()).unwrap();
///
/// for cell in [0, 3, 1, 4, 2] {
///     game.select_square(cell).unwrap();
/// }
/// assert_eq!(game.status(), GameStatus::Won(Mark::X));
///
/// game.jump_to(2).unwrap();
/// assert_eq!(game.status(), GameStatus::InProgress { next: Mark::X });
/// ```
#[derive(Debug)]
pub struct Game {
    log: HistoryLog<Board>,
}

impl Game {
    /// Open (or resume) the game stored under `config`'s keys.
    pub fn open(store: Arc<dyn Store>, config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let log = HistoryLog::open(store, config.keys(), Board::empty())?;
        debug!(
            "Opened game at step {} of {}",
            log.cursor(),
            log.len() - 1
        );
        Ok(Self { log })
    }

    /// Board at the viewed step.
    pub fn board(&self) -> &Board {
        self.log.current()
    }

    pub fn status(&self) -> GameStatus {
        rules::status(self.board())
    }

    /// Index of the viewed step; 0 is the empty board.
    pub fn step(&self) -> usize {
        self.log.cursor()
    }

    pub fn history(&self) -> &HistoryLog<Board> {
        &self.log
    }

    /// Play the next mark at `cell`, returning the new status.
    pub fn select_square(&mut self, cell: usize) -> Result<GameStatus, GameError> {
        let board = apply_move(&mut self.log, cell)?;
        Ok(rules::status(&board))
    }

    /// View an earlier (or later) step without changing the history.
    pub fn jump_to(&mut self, step: usize) -> Result<(), GameError> {
        self.log.jump_to(step)?;
        Ok(())
    }

    /// Start a new game, discarding all history.
    pub fn restart(&mut self) -> Result<(), GameError> {
        restart(&mut self.log, Board::empty())
    }

    /// The "go to move" list, one entry per recorded step.
    pub fn moves(&self) -> Vec<MoveEntry> {
        let current = self.step();
        (0..self.log.len())
            .map(|step| MoveEntry::new(step, step == current))
            .collect()
    }
}
