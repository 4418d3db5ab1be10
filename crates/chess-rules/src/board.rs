//! Board representation.

use chess_core::{Color, FenError, FenParser, Move, Piece, PieceType, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Back rank arrangement, a-file to h-file.
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// An 8x8 grid of optional pieces.
///
/// The board holds no rule logic: it stores pieces, relocates them when told
/// to, and answers occupancy queries. Legality lives in
/// [`movegen`](crate::movegen) and [`Game`](crate::Game).
///
/// Two boards are equal when every square holds the same piece.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// `grid[8 - row][col - 1]`, so rank 8 is stored first.
    grid: [[Option<Piece>; 8]; 8],
}

#[inline]
const fn index(pos: Position) -> (usize, usize) {
    ((8 - pos.row()) as usize, (pos.col() - 1) as usize)
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
        }
    }

    /// Creates a board in the standard starting arrangement.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// Creates a board from a FEN string. Only the placement field is used.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        Ok(Board::from(&parsed))
    }

    /// Clears the board and sets up the standard starting arrangement.
    pub fn reset(&mut self) {
        self.grid = [[None; 8]; 8];
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            self.grid[0][col] = Some(Piece::new(Color::Black, kind));
            self.grid[1][col] = Some(Piece::new(Color::Black, PieceType::Pawn));
            self.grid[6][col] = Some(Piece::new(Color::White, PieceType::Pawn));
            self.grid[7][col] = Some(Piece::new(Color::White, kind));
        }
    }

    /// Returns the piece at the given position, if any.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        let (i, j) = index(pos);
        self.grid[i][j]
    }

    /// Places a piece, returning whatever occupied the square before.
    pub fn add_piece(&mut self, pos: Position, piece: Piece) -> Option<Piece> {
        let (i, j) = index(pos);
        self.grid[i][j].replace(piece)
    }

    /// Removes and returns the piece at the given position.
    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        let (i, j) = index(pos);
        self.grid[i][j].take()
    }

    /// Executes a move without checking it: the destination is overwritten,
    /// the start is cleared, and a promotion replaces the moving piece's type.
    ///
    /// Returns the captured piece. Does nothing if the start square is empty.
    pub fn apply_move(&mut self, m: Move) -> Option<Piece> {
        let piece = self.remove_piece(m.start())?;
        let placed = match m.promotion() {
            Some(kind) => piece.promoted_to(kind),
            None => piece,
        };
        self.add_piece(m.end(), placed)
    }

    /// Returns a copy of this board with the move applied.
    pub fn with_move(&self, m: Move) -> Board {
        let mut scratch = self.clone();
        scratch.apply_move(m);
        scratch
    }

    /// Iterates over all occupied squares, row 1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    /// Iterates over the squares occupied by the given color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Returns the square of the given color's king, or `None` if the board
    /// has no such king.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        let king = Piece::new(color, PieceType::King);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(pos, _)| pos)
    }

    /// Returns the number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.grid.iter().flatten().filter(|sq| sq.is_some()).count()
    }

    /// Returns the FEN piece-placement field for this board.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for (i, rank) in self.grid.iter().enumerate() {
            let mut empty_count = 0;
            for square in rank {
                match square {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.symbol());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if i < 7 {
                fen.push('/');
            }
        }
        fen
    }
}

impl Default for Board {
    /// An empty board.
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&FenParser> for Board {
    fn from(parsed: &FenParser) -> Self {
        let mut board = Board::empty();
        for (pos, piece) in parsed.pieces() {
            board.add_piece(pos, piece);
        }
        board
    }
}

/// One line per rank, rank 8 first: `|r|n|b|q|k|b|n|r|`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in &self.grid {
            write!(f, "|")?;
            for square in rank {
                let symbol = square.map_or(' ', Piece::symbol);
                write!(f, "{}|", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}
