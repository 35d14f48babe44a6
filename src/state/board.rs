//! Board state.
//!
//! A plain N×N grid of marks owned by whoever renders the game. The session
//! never holds one; it only reports moves.

use std::fmt;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::protocol::Player;

/// Squares on one side of the board.
pub const BOARD_SIZE: usize = 3;

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => " ",
            Self::X => "X",
            Self::O => "O",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The player owning this mark, if any.
    pub fn player(&self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::X => Some(Player::X),
            Self::O => Some(Player::O),
        }
    }
}

impl From<Player> for Mark {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Self::X,
            Player::O => Self::O,
        }
    }
}

/// Board access errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BoardError {
    #[display("Square ({row}, {column}) is outside a {size}x{size} board")]
    OutOfRange {
        row: usize,
        column: usize,
        size: usize,
    },
}

impl std::error::Error for BoardError {}

/// N×N grid of marks, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<const N: usize = BOARD_SIZE> {
    squares: [[Mark; N]; N],
}

impl<const N: usize> Default for Board<N> {
    fn default() -> Self {
        Self {
            squares: [[Mark::Empty; N]; N],
        }
    }
}

impl<const N: usize> Board<N> {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        N
    }

    fn check(row: usize, column: usize) -> Result<(), BoardError> {
        if row < N && column < N {
            Ok(())
        } else {
            Err(BoardError::OutOfRange {
                row,
                column,
                size: N,
            })
        }
    }

    /// Overwrite a square. Does not check whether the move is legal.
    pub fn set_mark(&mut self, row: usize, column: usize, mark: Mark) -> Result<(), BoardError> {
        Self::check(row, column)?;
        self.squares[row][column] = mark;
        Ok(())
    }

    /// Get the mark at a square.
    pub fn mark_at(&self, row: usize, column: usize) -> Result<Mark, BoardError> {
        Self::check(row, column)?;
        Ok(self.squares[row][column])
    }

    /// Reset every square to empty.
    pub fn clear(&mut self) {
        self.squares = [[Mark::Empty; N]; N];
    }

    /// Check if a square is in range and empty.
    pub fn is_empty_at(&self, row: usize, column: usize) -> bool {
        matches!(self.mark_at(row, column), Ok(Mark::Empty))
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Mark; N]> {
        self.squares.iter()
    }

    pub fn empty_squares(&self) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|m| m.is_empty())
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_squares() == 0
    }

    /// Board as nested JSON arrays of "X", "O" and " ".
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .squares
            .iter()
            .map(|row| {
                let cells: Vec<serde_json::Value> =
                    row.iter().map(|m| serde_json::json!(m.as_str())).collect();
                serde_json::Value::Array(cells)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

impl<const N: usize> fmt::Display for Board<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.squares.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<&str> = row.iter().map(|m| m.as_str()).collect();
            write!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}
