//! Move generation.
//!
//! Two layers:
//! - [`piece_moves`] produces *pseudo-legal* moves from movement geometry and
//!   board occupancy alone, without looking at turn or check state.
//! - [`legal_moves`] keeps the pseudo-legal moves that do not leave the
//!   mover's own king attacked, testing each one on a scratch board with
//!   [`is_king_attacked`].

mod attacks;
pub mod perft;

use crate::Board;
use chess_core::{Color, Move, Piece, PieceType, Position};

pub use attacks::is_king_attacked;

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Iterates over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list holds the given move.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Extend<Move> for MoveList {
    fn extend<I: IntoIterator<Item = Move>>(&mut self, iter: I) {
        for m in iter {
            self.push(m);
        }
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// (row, column) steps for each movement pattern.
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Generates the pseudo-legal moves of `piece` standing on `from`.
///
/// This is a pure function of board occupancy: it ignores whose turn it is
/// and whether the mover's king ends up attacked. No generated move ever
/// lands on a square held by a piece of the mover's color.
pub fn piece_moves(piece: Piece, board: &Board, from: Position) -> MoveList {
    let mut moves = MoveList::new();
    let us = piece.color;
    match piece.kind {
        PieceType::Rook => generate_sliding_moves(board, from, us, &ROOK_DIRECTIONS, &mut moves),
        PieceType::Bishop => {
            generate_sliding_moves(board, from, us, &BISHOP_DIRECTIONS, &mut moves)
        }
        PieceType::Queen => generate_sliding_moves(board, from, us, &QUEEN_DIRECTIONS, &mut moves),
        PieceType::Knight => generate_stepping_moves(board, from, us, &KNIGHT_OFFSETS, &mut moves),
        PieceType::King => generate_stepping_moves(board, from, us, &KING_OFFSETS, &mut moves),
        PieceType::Pawn => generate_pawn_moves(board, from, us, &mut moves),
    }
    moves
}

/// Walks each direction until the edge, an own piece, or a capture.
fn generate_sliding_moves(
    board: &Board,
    from: Position,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(d_row, d_col) in directions {
        let mut next = from.offset(d_row, d_col);
        while let Some(to) = next {
            match board.piece_at(to) {
                None => moves.push(Move::normal(from, to)),
                Some(other) => {
                    if other.color != us {
                        moves.push(Move::normal(from, to));
                    }
                    break;
                }
            }
            next = to.offset(d_row, d_col);
        }
    }
}

/// One step per offset, onto empty or opponent-held squares.
fn generate_stepping_moves(
    board: &Board,
    from: Position,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(d_row, d_col) in offsets {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        if board.piece_at(to).map_or(true, |other| other.color != us) {
            moves.push(Move::normal(from, to));
        }
    }
}

/// Generates pseudo-legal pawn moves: pushes, the double push from the
/// starting row, diagonal captures, and one move per promotion choice on the
/// far row.
fn generate_pawn_moves(board: &Board, from: Position, us: Color, moves: &mut MoveList) {
    let forward = us.pawn_direction();

    if let Some(one) = from.offset(forward, 0) {
        if board.piece_at(one).is_none() {
            push_pawn_move(from, one, us, moves);

            if from.row() == us.pawn_start_row() {
                if let Some(two) = one.offset(forward, 0) {
                    if board.piece_at(two).is_none() {
                        moves.push(Move::normal(from, two));
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(to) = from.offset(forward, d_col) else {
            continue;
        };
        if board.piece_at(to).is_some_and(|other| other.color != us) {
            push_pawn_move(from, to, us, moves);
        }
    }
}

fn push_pawn_move(from: Position, to: Position, us: Color, moves: &mut MoveList) {
    if to.row() == us.promotion_row() {
        for kind in PieceType::PROMOTIONS {
            moves.push(Move::promoting(from, to, kind));
        }
    } else {
        moves.push(Move::normal(from, to));
    }
}

/// Returns the legal moves of the piece on `from`.
///
/// A pseudo-legal move is kept when, after playing it on a copy of the
/// board, the mover's king is not attacked. An empty square yields an empty
/// list.
pub fn legal_moves(board: &Board, from: Position) -> MoveList {
    let Some(piece) = board.piece_at(from) else {
        return MoveList::new();
    };
    let mut moves = piece_moves(piece, board, from);
    moves.retain(|m| !is_king_attacked(&board.with_move(*m), piece.color));
    moves
}

/// Returns the legal moves of every piece of the given color.
pub fn legal_moves_for(board: &Board, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (from, _) in board.pieces_of(color) {
        moves.extend(legal_moves(board, from).iter().copied());
    }
    moves
}

/// Returns true if any piece of the given color has a legal move.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(from, _)| !legal_moves(board, from).is_empty())
}
