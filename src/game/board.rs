//! Tic-tac-toe board snapshots.

use super::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of cells on a board.
pub const CELLS: usize = 9;

/// A player's mark.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X => "X",
            Self::O => "O",
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nine cells in row-major order, each empty or holding a mark.
///
/// Boards are values: placing a mark returns a new board. Serialized as
/// a JSON array of nine `null | "X" | "O"` entries.
///
/// # Example
///
/// ```rust
/// use rewind::game::{Board, Mark};
///
/// let board: Board = "XX. .O. ...".parse().unwrap();
/// assert_eq!(board.cell(1), Some(Mark::X));
/// assert_eq!(board.cell(4), Some(Mark::O));
/// assert_eq!(board.filled_count(), 3);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([Option<Mark>; CELLS]);

impl Board {
    /// A board with every cell empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Mark>; CELLS]) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Option<Mark>; CELLS] {
        &self.0
    }

    /// Mark at `index`; `None` for an empty cell or an index off the board.
    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.0.get(index).copied().flatten()
    }

    /// Copy of this board with `mark` placed at `index`.
    ///
    /// An index off the board returns an unchanged copy.
    pub fn with_mark(&self, index: usize, mark: Mark) -> Self {
        let mut cells = self.0;
        if let Some(cell) = cells.get_mut(index) {
            *cell = Some(mark);
        }
        Self(cells)
    }

    pub fn filled_count(&self) -> usize {
        self.0.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.0.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                f.write_str(cell.map_or(".", |m| m.as_str()))?;
            }
        }
        Ok(())
    }
}

/// Parses nine cells from `X`, `O` and `.`/`_`; whitespace is ignored.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| GameError::InvalidBoard {
            input: s.to_string(),
            message,
        };

        let mut cells = [None; CELLS];
        let mut count = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '_' => None,
                other => return Err(invalid(format!("unexpected character '{other}'"))),
            };
            if count == CELLS {
                return Err(invalid(format!("more than {CELLS} cells")));
            }
            cells[count] = cell;
            count += 1;
        }

        if count != CELLS {
            return Err(invalid(format!("expected {CELLS} cells, found {count}")));
        }
        Ok(Self(cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_marks() {
        let board = Board::empty();
        assert_eq!(board.filled_count(), 0);
        assert!(!board.is_full());
        assert!((0..CELLS).all(|i| board.cell(i).is_none()));
    }

    #[test]
    fn with_mark_returns_new_board() {
        let board = Board::empty();
        let next = board.with_mark(4, Mark::X);

        assert_eq!(board.cell(4), None);
        assert_eq!(next.cell(4), Some(Mark::X));
    }

    #[test]
    fn off_board_index_is_ignored() {
        let board = Board::empty().with_mark(9, Mark::O);
        assert_eq!(board, Board::empty());
        assert_eq!(board.cell(42), None);
    }

    #[test]
    fn board_serializes_as_nullable_array() {
        let board = Board::empty().with_mark(0, Mark::X).with_mark(8, Mark::O);
        let json = serde_json::to_string(&board).unwrap();

        assert_eq!(
            json,
            r#"["X",null,null,null,null,null,null,null,"O"]"#
        );
    }

    #[test]
    fn board_reads_stored_array() {
        let raw = r#"[null,"O",null,null,"X",null,null,null,null]"#;
        let board: Board = serde_json::from_str(raw).unwrap();

        assert_eq!(board, "_O_ _X_ ___".parse().unwrap());
    }

    #[test]
    fn board_rejects_wrong_length_array() {
        let result: Result<Board, _> = serde_json::from_str("[null,null]");
        assert!(result.is_err());
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            "XXO".parse::<Board>(),
            Err(GameError::InvalidBoard { .. })
        ));
        assert!("XXOOXXOOXX".parse::<Board>().is_err());
        assert!("XXOOXXOO?".parse::<Board>().is_err());
    }

    #[test]
    fn display_renders_rows() {
        let board: Board = "XO. ... ..X".parse().unwrap();
        assert_eq!(board.to_string(), "XO.\n...\n..X");
    }

    #[test]
    fn mark_opponent_alternates() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }
}
