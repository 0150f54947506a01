//! Bishop move generation
//!
//! Bishops slide along diagonals until blocked.

use crate::board::Board;
use crate::piece::Piece;
use crate::square::Square;

use super::sliding::{ray_destinations, DIAGONAL};

/// Generate bishop candidate destinations.
pub(crate) fn candidate_destinations(board: &Board, piece: &Piece) -> Vec<Square> {
    ray_destinations(board, piece.square(), piece.color, &DIAGONAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    #[test]
    fn test_starting_bishop_is_boxed_in() {
        //! Verifies bishops have no moves in the standard starting position
        let board = Board::standard();
        let bishop = board.piece_at(Square::parse("c1").unwrap()).unwrap();
        assert!(candidate_destinations(&board, bishop).is_empty());
    }

    #[test]
    fn test_open_bishop_sweeps_both_diagonals() {
        //! Tests the full diagonal sweep from a central square
        let mut board = Board::empty();
        let bishop = board.place(PieceKind::Bishop, Color::Black, Square::parse("d4").unwrap());
        let moves = candidate_destinations(&board, board.piece(bishop).unwrap());
        assert_eq!(moves.len(), 13);
        assert!(moves.contains(&Square::parse("a1").unwrap()));
        assert!(moves.contains(&Square::parse("h8").unwrap()));
        assert!(moves.contains(&Square::parse("a7").unwrap()));
        assert!(moves.contains(&Square::parse("g1").unwrap()));
    }
}
