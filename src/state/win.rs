//! Win detection and the winning-location code.
//!
//! # Location code
//!
//! For a board of size N the server reports the winning line as one integer:
//!
//! ```text
//! 0           no line (draw, abandoned)
//! 1 ..= N     row (code - 1)
//! N+1 ..= 2N  column (code - N - 1)
//! 2N + 1      diagonal from the top-left corner
//! 2N + 2      diagonal from the bottom-left corner
//! ```

use serde::{Deserialize, Serialize};

use super::board::{Board, Mark};
use super::protocol::{Player, ProtocolError};

/// Shape of a winning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinKind {
    None,
    Row,
    Column,
    DiagonalFromTopLeft,
    DiagonalFromBottomLeft,
}

/// A winning line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index")]
pub enum WinDescriptor {
    #[default]
    None,
    Row(usize),
    Column(usize),
    DiagonalFromTopLeft,
    DiagonalFromBottomLeft,
}

impl WinDescriptor {
    pub fn kind(&self) -> WinKind {
        match self {
            Self::None => WinKind::None,
            Self::Row(_) => WinKind::Row,
            Self::Column(_) => WinKind::Column,
            Self::DiagonalFromTopLeft => WinKind::DiagonalFromTopLeft,
            Self::DiagonalFromBottomLeft => WinKind::DiagonalFromBottomLeft,
        }
    }

    /// Row or column index; `None` for diagonals and no-win.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Row(i) | Self::Column(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_win(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Encode as a winning-location code for a board of `size`.
    ///
    /// Fails for a row or column outside the board, or a code that does not
    /// fit the wire format.
    pub fn to_location_code(&self, size: usize) -> Result<u32, ProtocolError> {
        let code = match self {
            Self::Row(i) | Self::Column(i) if *i >= size => None,
            Self::None => Some(0),
            Self::Row(i) => i.checked_add(1),
            Self::Column(i) => size.checked_add(*i).and_then(|c| c.checked_add(1)),
            Self::DiagonalFromTopLeft => size.checked_mul(2).and_then(|c| c.checked_add(1)),
            Self::DiagonalFromBottomLeft => size.checked_mul(2).and_then(|c| c.checked_add(2)),
        };
        code.and_then(|c| u32::try_from(c).ok())
            .ok_or(ProtocolError::LineOutOfRange { line: *self, size })
    }

    /// Decode a winning-location code for a board of `size`.
    pub fn from_location_code(code: u32, size: usize) -> Result<Self, ProtocolError> {
        let c = code as usize;
        let double = size.saturating_mul(2);
        match c {
            0 => Ok(Self::None),
            c if c <= size => Ok(Self::Row(c - 1)),
            c if c <= double => Ok(Self::Column(c - size - 1)),
            c if c == double.saturating_add(1) => Ok(Self::DiagonalFromTopLeft),
            c if c == double.saturating_add(2) => Ok(Self::DiagonalFromBottomLeft),
            _ => Err(ProtocolError::UnknownLocation { code }),
        }
    }

    /// Squares covered by this line, in scan order.
    pub fn squares(&self, size: usize) -> Vec<(usize, usize)> {
        match self {
            Self::None => Vec::new(),
            Self::Row(r) => (0..size).map(|c| (*r, c)).collect(),
            Self::Column(c) => (0..size).map(|r| (r, *c)).collect(),
            Self::DiagonalFromTopLeft => (0..size).map(|i| (i, i)).collect(),
            Self::DiagonalFromBottomLeft => (0..size).map(|i| (size - 1 - i, i)).collect(),
        }
    }
}

/// The common non-empty mark on a line, if every square shares it.
fn line_owner<const N: usize>(
    board: &Board<N>,
    mut squares: impl Iterator<Item = (usize, usize)>,
) -> Option<Mark> {
    let (r, c) = squares.next()?;
    let first = board.mark_at(r, c).ok()?;
    if first.is_empty() {
        return None;
    }
    for (r, c) in squares {
        if board.mark_at(r, c).ok()? != first {
            return None;
        }
    }
    Some(first)
}

/// Candidate lines in detection order: rows, columns, then both diagonals.
fn lines(size: usize) -> impl Iterator<Item = WinDescriptor> {
    (0..size)
        .map(WinDescriptor::Row)
        .chain((0..size).map(WinDescriptor::Column))
        .chain([
            WinDescriptor::DiagonalFromTopLeft,
            WinDescriptor::DiagonalFromBottomLeft,
        ])
}

fn find_line<const N: usize>(board: &Board<N>) -> Option<(WinDescriptor, Mark)> {
    if N == 0 {
        return None;
    }
    lines(N).find_map(|line| {
        line_owner(board, line.squares(N).into_iter()).map(|mark| (line, mark))
    })
}

/// Find the first complete line on the board.
///
/// Rows are scanned top to bottom, then columns left to right, then the
/// top-left diagonal, then the bottom-left diagonal.
pub fn detect_win<const N: usize>(board: &Board<N>) -> WinDescriptor {
    find_line(board)
        .map(|(line, _)| line)
        .unwrap_or(WinDescriptor::None)
}

/// The player owning the first complete line, if any.
pub fn winner<const N: usize>(board: &Board<N>) -> Option<Player> {
    find_line(board).and_then(|(_, mark)| mark.player())
}
