//! Pure tic-tac-toe rules.
//!
//! Everything here is a function of a single board. Nothing is stored:
//! the next mover and the status are recomputed from whichever snapshot
//! the history cursor points at.

use super::board::{Board, Mark, CELLS};
use super::error::IllegalMoveReason;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The eight winning lines, checked in this order: rows, columns,
/// diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Observable game status.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress { next: Mark },
    Won(Mark),
    Draw,
}

impl GameStatus {
    /// Check if this is a terminal status.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Won(_) | Self::Draw)
    }

    /// The winning mark, if the game was won.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Self::Won(mark) => Some(*mark),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress { next } => write!(f, "Next player: {next}"),
            Self::Won(mark) => write!(f, "Winner: {mark}"),
            Self::Draw => f.write_str("Scratch: Cat's game"),
        }
    }
}

/// Result of checking a proposed move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveLegality {
    Legal,
    Illegal(IllegalMoveReason),
}

impl MoveLegality {
    pub fn is_legal(&self) -> bool {
        matches!(self, Self::Legal)
    }
}

/// X moves on an even number of filled cells, O on an odd number.
pub fn next_mover(board: &Board) -> Mark {
    if board.filled_count() % 2 == 0 {
        Mark::X
    } else {
        Mark::O
    }
}

/// First completed line in [`LINES`] order, with its mark.
pub fn winning_line(board: &Board) -> Option<(Mark, [usize; 3])> {
    LINES.iter().find_map(|&[a, b, c]| {
        let mark = board.cell(a)?;
        (board.cell(b) == Some(mark) && board.cell(c) == Some(mark)).then_some((mark, [a, b, c]))
    })
}

pub fn winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}

pub fn status(board: &Board) -> GameStatus {
    if let Some(mark) = winner(board) {
        GameStatus::Won(mark)
    } else if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress {
            next: next_mover(board),
        }
    }
}

/// Check whether `cell` may be marked next.
///
/// Reasons are checked in order: off the board, occupied, game over.
pub fn legal_move(board: &Board, cell: usize) -> MoveLegality {
    if cell >= CELLS {
        MoveLegality::Illegal(IllegalMoveReason::OutOfBounds)
    } else if board.cell(cell).is_some() {
        MoveLegality::Illegal(IllegalMoveReason::Occupied)
    } else if status(board).is_final() {
        MoveLegality::Illegal(IllegalMoveReason::GameOver)
    } else {
        MoveLegality::Legal
    }
}
