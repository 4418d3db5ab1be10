//! Game state: a board plus the side to move.
//!
//! [`Game`] is the only way to change a board under the rules. Moves are
//! accepted through [`Game::make_move`], which checks ownership, turn, and
//! legality before touching the board, then hands the turn to the other side.
//!
//! Checkmate and stalemate are observable predicates rather than states; the
//! game keeps accepting queries (and, if any exist, moves) after either.

use crate::movegen::{has_legal_move, is_king_attacked, legal_moves, legal_moves_for};
use crate::{Board, MoveList};
use chess_core::{Color, FenError, FenParser, Move, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a move was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("no piece on {0}")]
    EmptySquare(Position),
    #[error("it is {0}'s turn")]
    WrongTurn(Color),
    #[error("not a legal move")]
    Illegal,
}

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move was refused; the board is unchanged.
    #[error("invalid move {mov}: {reason}")]
    InvalidMove { mov: Move, reason: MoveRejection },
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Black is checkmated.
    WhiteWins,
    /// White is checkmated.
    BlackWins,
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

/// A chess game: board, side to move, and the moves played so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::startpos(), Color::White)
    }

    /// Creates a game from an arbitrary board and side to move.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Game {
            board,
            turn,
            history: Vec::new(),
        }
    }

    /// Creates a game from a FEN string (placement and active color).
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        Ok(Self::from_board(Board::from(&parsed), parsed.active_color))
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the moves accepted so far.
    pub fn move_history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the legal moves of the piece on `position`.
    ///
    /// Empty when the square is empty or the piece cannot move. Whose turn it
    /// is does not matter here.
    pub fn valid_moves(&self, position: Position) -> MoveList {
        legal_moves(&self.board, position)
    }

    /// Returns every legal move of the side to move.
    pub fn legal_moves(&self) -> MoveList {
        legal_moves_for(&self.board, self.turn)
    }

    /// Returns true if `color`'s king is attacked on the current board.
    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_attacked(&self.board, color)
    }

    /// Returns true if `color` is in check and no piece of `color` has a
    /// legal move.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !has_legal_move(&self.board, color)
    }

    /// Returns true if `color` has a king, is not in check, and no piece of
    /// `color` has a legal move.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        self.board.king_position(color).is_some()
            && !self.is_in_check(color)
            && !has_legal_move(&self.board, color)
    }

    /// Returns the result if the side to move is checkmated or stalemated.
    pub fn result(&self) -> Option<GameResult> {
        if self.is_in_checkmate(self.turn) {
            Some(match self.turn {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            })
        } else if self.is_in_stalemate(self.turn) {
            Some(GameResult::Stalemate)
        } else {
            None
        }
    }

    /// Returns true if the side to move is checkmated or stalemated.
    pub fn is_game_over(&self) -> bool {
        self.result().is_some()
    }

    /// Makes a move for the side to move.
    ///
    /// The move must start on a square holding a piece of the side to move
    /// and must be one of that piece's legal moves. On success the move is
    /// applied and the turn passes; on failure nothing changes.
    pub fn make_move(&mut self, m: Move) -> Result<(), GameError> {
        if let Err(reason) = self.check_move(m) {
            tracing::debug!(mov = %m, %reason, turn = %self.turn, "move rejected");
            return Err(GameError::InvalidMove { mov: m, reason });
        }

        let captured = self.board.apply_move(m);
        tracing::debug!(
            mov = %m,
            color = %self.turn,
            captured = ?captured,
            "move applied"
        );
        self.history.push(m);
        self.turn = self.turn.opposite();
        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Some(result) = self.result() {
                tracing::debug!(?result, turn = %self.turn, "terminal position");
            }
        }
        Ok(())
    }

    fn check_move(&self, m: Move) -> Result<(), MoveRejection> {
        let piece = self
            .board
            .piece_at(m.start())
            .ok_or(MoveRejection::EmptySquare(m.start()))?;
        if piece.color != self.turn {
            return Err(MoveRejection::WrongTurn(self.turn));
        }
        if !self.valid_moves(m.start()).contains(&m) {
            return Err(MoveRejection::Illegal);
        }
        Ok(())
    }
}

/// The board dump followed by the side to move.
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "Side to move: {}", self.turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Piece, PieceType};

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn mv(from: &str, to: &str) -> Move {
        Move::normal(pos(from), pos(to))
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.board(), &Board::startpos());
        assert_eq!(game.ply_count(), 0);
        assert!(!game.is_in_check(Color::White));
        assert!(!game.is_game_over());
    }

    #[test]
    fn opening_pawn_push() {
        let mut game = Game::new();
        game.make_move(mv("e2", "e4")).unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.board().piece_at(pos("e2")), None);
        assert_eq!(
            game.board().piece_at(pos("e4")),
            Some(Piece::new(Color::White, PieceType::Pawn))
        );
        assert_eq!(game.move_history(), &[mv("e2", "e4")]);
    }

    #[test]
    fn wrong_turn_rejected() {
        let mut game = Game::new();
        let err = game.make_move(mv("e7", "e5")).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidMove {
                mov: mv("e7", "e5"),
                reason: MoveRejection::WrongTurn(Color::White),
            }
        );
        assert_eq!(game.board(), &Board::startpos());
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn empty_square_rejected() {
        let mut game = Game::new();
        let err = game.make_move(mv("e4", "e5")).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidMove {
                reason: MoveRejection::EmptySquare(_),
                ..
            }
        ));
    }

    #[test]
    fn wrong_geometry_rejected() {
        let mut game = Game::new();
        let err = game.make_move(mv("e2", "e5")).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidMove {
                reason: MoveRejection::Illegal,
                ..
            }
        ));
        assert_eq!(game.board(), &Board::startpos());
    }

    #[test]
    fn move_exposing_king_rejected() {
        let mut game = Game::from_fen("4r2k/8/8/8/8/8/4R3/4K3 w").unwrap();
        let before = game.board().clone();
        let err = game.make_move(mv("e2", "a2")).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidMove {
                reason: MoveRejection::Illegal,
                ..
            }
        ));
        assert_eq!(game.board(), &before);
        game.make_move(mv("e2", "e8")).unwrap();
    }

    #[test]
    fn promotion_must_name_a_piece() {
        let mut game = Game::from_fen("k7/4P3/8/8/8/8/8/K7 w").unwrap();
        assert!(game.make_move(mv("e7", "e8")).is_err());
        let promote = Move::promoting(pos("e7"), pos("e8"), PieceType::Knight);
        game.make_move(promote).unwrap();
        assert_eq!(
            game.board().piece_at(pos("e8")),
            Some(Piece::new(Color::White, PieceType::Knight))
        );
    }

    #[test]
    fn valid_moves_on_empty_square() {
        let game = Game::new();
        assert!(game.valid_moves(pos("e4")).is_empty());
    }

    #[test]
    fn valid_moves_ignore_turn() {
        let game = Game::new();
        assert_eq!(game.valid_moves(pos("g8")).len(), 2);
    }

    #[test]
    fn turns_alternate() {
        let mut game = Game::new();
        let moves = [
            mv("e2", "e4"),
            mv("e7", "e5"),
            mv("g1", "f3"),
            mv("b8", "c6"),
            mv("f1", "b5"),
        ];
        for (n, m) in moves.into_iter().enumerate() {
            game.make_move(m).unwrap();
            let expected = if (n + 1) % 2 == 0 {
                Color::White
            } else {
                Color::Black
            };
            assert_eq!(game.turn(), expected);
        }
        assert_eq!(game.ply_count(), 5);
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        game.make_move(mv("f2", "f3")).unwrap();
        game.make_move(mv("e7", "e5")).unwrap();
        game.make_move(mv("g2", "g4")).unwrap();
        game.make_move(mv("d8", "h4")).unwrap();
        assert!(game.is_in_check(Color::White));
        assert!(game.is_in_checkmate(Color::White));
        assert!(!game.is_in_stalemate(Color::White));
        assert!(!game.is_in_checkmate(Color::Black));
        assert_eq!(game.result(), Some(GameResult::BlackWins));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn back_rank_mate() {
        let game = Game::from_fen("k7/8/8/8/8/8/6PP/r6K w").unwrap();
        assert!(game.is_in_checkmate(Color::White));
        assert_eq!(game.result(), Some(GameResult::BlackWins));
    }

    #[test]
    fn check_with_a_block_is_not_mate() {
        let game = Game::from_fen("k7/8/8/8/8/4B3/6PP/r6K w").unwrap();
        assert!(game.is_in_check(Color::White));
        assert!(game.valid_moves(pos("h1")).is_empty());
        assert!(!game.is_in_checkmate(Color::White));
        assert_eq!(game.result(), None);
    }

    #[test]
    fn capturing_the_checker_is_not_mate() {
        // g1 shields the king from the a1 rook.
        let game = Game::from_fen("k7/8/8/8/8/8/6PP/r5RK w").unwrap();
        assert!(!game.is_in_check(Color::White));

        let game = Game::from_fen("k7/8/8/8/8/8/R5PP/r6K w").unwrap();
        assert!(game.is_in_check(Color::White));
        assert!(!game.is_in_checkmate(Color::White));
        assert!(game.valid_moves(pos("a2")).contains(&mv("a2", "a1")));
    }

    #[test]
    fn stalemate() {
        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b").unwrap();
        assert!(!game.is_in_check(Color::Black));
        assert!(game.is_in_stalemate(Color::Black));
        assert!(!game.is_in_checkmate(Color::Black));
        assert_eq!(game.result(), Some(GameResult::Stalemate));
        assert!(!game.is_in_stalemate(Color::White));
    }

    #[test]
    fn kingless_board_is_neither_mate_nor_stalemate() {
        let game = Game::from_fen("8/8/8/8/8/8/8/R7 b").unwrap();
        assert!(!game.is_in_check(Color::Black));
        assert!(!game.is_in_checkmate(Color::Black));
        assert!(!game.is_in_stalemate(Color::Black));
        assert_eq!(game.result(), None);
    }

    #[test]
    fn moves_allowed_after_terminal_position() {
        // Black is stalemated, but White may still be asked to move.
        let mut game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 w").unwrap();
        assert!(game.is_in_stalemate(Color::Black));
        game.make_move(mv("f7", "f8")).unwrap();
        assert!(game.is_in_checkmate(Color::Black));
    }

    #[test]
    fn display_includes_turn() {
        let game = Game::new();
        let text = game.to_string();
        assert!(text.starts_with("|r|n|b|q|k|b|n|r|\n"));
        assert!(text.ends_with("Side to move: White\n"));
    }

    #[test]
    fn serde_roundtrip() {
        let mut game = Game::new();
        game.make_move(mv("d2", "d4")).unwrap();
        game.make_move(mv("g8", "f6")).unwrap();
        let json = serde_json::to_string(&game).unwrap();
        let restored: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, game);
        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.turn(), Color::White);
    }

    mod events {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;
        use tracing::span::{Attributes, Id, Record};
        use tracing::{Event, Metadata, Subscriber};

        /// Counts every event dispatched while it is the default subscriber.
        pub struct EventCounter(pub Arc<AtomicUsize>);

        impl Subscriber for EventCounter {
            fn enabled(&self, _: &Metadata<'_>) -> bool {
                true
            }
            fn new_span(&self, _: &Attributes<'_>) -> Id {
                Id::from_u64(1)
            }
            fn record(&self, _: &Id, _: &Record<'_>) {}
            fn record_follows_from(&self, _: &Id, _: &Id) {}
            fn event(&self, _: &Event<'_>) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
            fn enter(&self, _: &Id) {}
            fn exit(&self, _: &Id) {}
        }

        pub fn count_events(f: impl FnOnce()) -> usize {
            let count = Arc::new(AtomicUsize::new(0));
            tracing::subscriber::with_default(EventCounter(Arc::clone(&count)), f);
            count.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn terminal_position_logged_once_by_the_mating_move() {
        let mut game = Game::new();
        game.make_move(mv("f2", "f3")).unwrap();
        game.make_move(mv("e7", "e5")).unwrap();
        game.make_move(mv("g2", "g4")).unwrap();

        // "move applied" plus "terminal position"
        let mating = events::count_events(|| game.make_move(mv("d8", "h4")).unwrap());
        assert_eq!(mating, 2);

        let polling = events::count_events(|| {
            for _ in 0..3 {
                assert_eq!(game.result(), Some(GameResult::BlackWins));
                assert!(game.is_game_over());
            }
        });
        assert_eq!(polling, 0);
    }

    #[test]
    fn error_display() {
        let err = GameError::InvalidMove {
            mov: mv("e7", "e5"),
            reason: MoveRejection::WrongTurn(Color::White),
        };
        assert_eq!(err.to_string(), "invalid move e7e5: it is White's turn");
    }
}
