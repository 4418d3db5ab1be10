//! King attack detection.

use super::piece_moves;
use crate::Board;
use chess_core::Color;

/// Returns true if `color`'s king is attacked on `board`.
///
/// Every opposing piece's pseudo-legal destinations are compared with the
/// king square by value. Only movement geometry is consulted, never
/// legality, so check detection cannot recurse into legality filtering.
///
/// A board without a king of that color is never in check.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    let Some(king) = board.king_position(color) else {
        return false;
    };
    board.pieces_of(color.opposite()).any(|(from, piece)| {
        piece_moves(piece, board, from)
            .iter()
            .any(|m| m.end() == king)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn startpos_no_attacks() {
        let board = Board::startpos();
        assert!(!is_king_attacked(&board, Color::White));
        assert!(!is_king_attacked(&board, Color::Black));
    }

    #[test]
    fn rook_attacks_along_rank() {
        let board = board("k7/8/8/8/8/8/8/r3K3");
        assert!(is_king_attacked(&board, Color::White));
        assert!(!is_king_attacked(&board, Color::Black));
    }

    #[test]
    fn blocked_ray_does_not_attack() {
        let board = board("k7/8/8/8/8/8/8/r1N1K3");
        assert!(!is_king_attacked(&board, Color::White));
    }

    #[test]
    fn knight_and_pawn_attacks() {
        assert!(is_king_attacked(&board("8/8/8/8/8/5n2/8/4K3"), Color::White));
        assert!(is_king_attacked(&board("8/8/8/8/8/8/3p4/4K3"), Color::White));
        assert!(is_king_attacked(&board("4k3/5P2/8/8/8/8/8/8"), Color::Black));
    }

    #[test]
    fn pawn_does_not_attack_straight_ahead() {
        assert!(!is_king_attacked(&board("8/8/8/8/8/8/4p3/4K3"), Color::White));
    }

    #[test]
    fn kings_attack_each_other() {
        let board = board("8/8/8/8/8/8/4k3/4K3");
        assert!(is_king_attacked(&board, Color::White));
        assert!(is_king_attacked(&board, Color::Black));
    }

    #[test]
    fn missing_king_is_not_attacked() {
        let board = board("8/8/8/8/8/8/8/q7");
        assert!(!is_king_attacked(&board, Color::White));
        assert!(!is_king_attacked(&Board::empty(), Color::Black));
    }
}
