//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - an 8×8 grid of optional pieces addressed by [`Position`](chess_core::Position)
//! - Pseudo-legal move generation per piece type ([`piece_moves`])
//! - Legality filtering by king safety ([`legal_moves`], [`is_king_attacked`])
//! - [`Game`] - turn enforcement, move application, check, checkmate and
//!   stalemate queries
//! - [`GameSetup`] - starting positions loaded from TOML
//!
//! # Architecture
//!
//! Movement geometry and legality are kept apart. Each piece type yields the
//! moves its geometry allows against the current board, ignoring check. A
//! candidate is legal when the mover's king is not attacked on a copy of the
//! board with the candidate applied. Attack detection only consults geometry,
//! so it never recurses into legality.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Move, Position};
//! use chess_rules::Game;
//!
//! let mut game = Game::new();
//! println!("Legal moves from starting position: {}", game.legal_moves().len());
//!
//! let e2 = Position::from_algebraic("e2").unwrap();
//! let e4 = Position::from_algebraic("e4").unwrap();
//! game.make_move(Move::normal(e2, e4)).unwrap();
//! assert_eq!(game.turn(), Color::Black);
//! println!("{game}");
//! ```

mod board;
mod game;
pub mod movegen;
mod setup;

pub use board::Board;
pub use game::{Game, GameError, GameResult, MoveRejection};
pub use movegen::{
    has_legal_move, is_king_attacked, legal_moves, legal_moves_for, piece_moves, MoveList,
};
pub use setup::{GameSetup, SetupError};
