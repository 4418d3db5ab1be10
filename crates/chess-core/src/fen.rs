//! FEN (Forsyth-Edwards Notation) placement parsing.
//!
//! Only the piece placement and active color fields carry meaning here.
//! Castling, en passant, and clock fields are accepted so that full FEN
//! strings can be pasted in, but they are not interpreted.

use crate::{Color, Piece, Position};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 1 to 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),
}

/// Parsed FEN data.
///
/// Holds the validated placement string and the side to move. The rules
/// crate turns this into a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Piece placement string (e.g., "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
    pub piece_placement: String,
    /// Side to move; White when the field is omitted.
    pub active_color: Color,
}

impl FenParser {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.is_empty() || parts.len() > 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let piece_placement = parts[0];
        Self::validate_piece_placement(piece_placement)?;

        let active_color = match parts.get(1) {
            None | Some(&"w") => Color::White,
            Some(&"b") => Color::Black,
            Some(other) => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        Ok(FenParser {
            piece_placement: piece_placement.to_string(),
            active_color,
        })
    }

    fn validate_piece_placement(placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        for (i, rank) in ranks.iter().enumerate() {
            let mut squares = 0;
            for c in rank.chars() {
                if let Some(digit) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    squares += digit;
                } else if Piece::from_symbol(c).is_some() {
                    squares += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - i
                    )));
                }
            }
            if squares != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - i,
                    squares
                )));
            }
        }

        Ok(())
    }

    /// Returns every placed piece with its position, rank 8 first.
    ///
    /// The fields are public, so the placement may not have gone through
    /// [`FenParser::parse`]. Squares past the eighth rank or file are
    /// skipped rather than wrapped.
    pub fn pieces(&self) -> Vec<(Position, Piece)> {
        let mut placed = Vec::new();
        for (row, rank) in (1..=8u8).rev().zip(self.piece_placement.split('/')) {
            let mut col = 1u8;
            for c in rank.chars() {
                if let Some(digit) = c.to_digit(10) {
                    col = col.saturating_add(digit.min(8) as u8);
                } else if let Some(piece) = Piece::from_symbol(c) {
                    if let Some(pos) = Position::new(row, col) {
                        placed.push((pos, piece));
                    }
                    col = col.saturating_add(1);
                }
            }
        }
        placed
    }

    /// Converts the parsed FEN back to a FEN string.
    pub fn to_fen(&self) -> String {
        let color = match self.active_color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{} {}", self.piece_placement, color)
    }
}

impl Default for FenParser {
    fn default() -> Self {
        FenParser {
            piece_placement: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".to_string(),
            active_color: Color::White,
        }
    }
}
