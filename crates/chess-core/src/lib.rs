//! Core types for chess.
//!
//! This crate provides the fundamental types used by the rules engine:
//! - [`Piece`], [`PieceType`] and [`Color`] for piece representation
//! - [`Position`] for board coordinates (rows and columns 1-8)
//! - [`Move`] for move representation, including promotion
//! - FEN piece-placement parsing

mod color;
mod fen;
mod mov;
mod piece;
mod position;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::Move;
pub use piece::{Piece, PieceType};
pub use position::{Position, PositionError};
