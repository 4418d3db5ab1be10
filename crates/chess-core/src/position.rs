//! Board coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when building a [`Position`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    #[error("position ({row}, {col}) is off the board: rows and columns run 1-8")]
    OutOfBounds { row: u8, col: u8 },
}

/// A square on the chess board, addressed by row (rank) and column (file).
///
/// Both coordinates are 1-indexed: row 1 is White's back rank and column 1
/// is the a-file. A `Position` is always on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position, or `None` if either coordinate is outside 1-8.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row >= 1 && row <= 8 && col >= 1 && col <= 8 {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// Parses a position from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Position::new(rank - b'0', file - b'a' + 1)
    }

    /// Returns the row (1-8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (1-8).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the position shifted by the given deltas, if still on the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i16 + d_row as i16;
        let col = self.col as i16 + d_col as i16;
        if row < 1 || row > 8 || col < 1 || col > 8 {
            return None;
        }
        Position::new(row as u8, col as u8)
    }

    /// Returns the algebraic notation for this position.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.col - 1) as char, self.row)
    }

    /// Iterates over all 64 positions, row 1 first, a-file first within a row.
    pub fn all() -> impl Iterator<Item = Position> {
        (1..=8u8).flat_map(|row| (1..=8u8).map(move |col| Position { row, col }))
    }

    pub const A1: Position = Position { row: 1, col: 1 };
    pub const E1: Position = Position { row: 1, col: 5 };
    pub const E8: Position = Position { row: 8, col: 5 };
    pub const H8: Position = Position { row: 8, col: 8 };
}

impl TryFrom<(u8, u8)> for Position {
    type Error = PositionError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Position::new(row, col).ok_or(PositionError::OutOfBounds { row, col })
    }
}

impl From<Position> for (u8, u8) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_algebraic())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
