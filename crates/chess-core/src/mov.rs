//! Move representation.

use crate::{Color, PieceType, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chess move: a start and end position, plus the promotion choice when a
/// pawn reaches the far rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    start: Position,
    end: Position,
    promotion: Option<PieceType>,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(start: Position, end: Position, promotion: Option<PieceType>) -> Self {
        Move {
            start,
            end,
            promotion,
        }
    }

    /// Creates a move without promotion.
    #[inline]
    pub const fn normal(start: Position, end: Position) -> Self {
        Self::new(start, end, None)
    }

    /// Creates a promoting move.
    #[inline]
    pub const fn promoting(start: Position, end: Position, kind: PieceType) -> Self {
        Self::new(start, end, Some(kind))
    }

    /// Returns the start position.
    #[inline]
    pub const fn start(self) -> Position {
        self.start
    }

    /// Returns the end position.
    #[inline]
    pub const fn end(self) -> Position {
        self.end
    }

    /// Returns the promotion piece type, if any.
    #[inline]
    pub const fn promotion(self) -> Option<PieceType> {
        self.promotion
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Returns the coordinate form of this move (e.g., "e2e4", "e7e8q").
    pub fn to_coordinate(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.start, self.end, kind.to_char(Color::Black)),
            None => format!("{}{}", self.start, self.end),
        }
    }

    /// A placeholder move (a1a1), never produced by move generation.
    pub const NULL: Move = Move::normal(Position::A1, Position::A1);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coordinate())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
