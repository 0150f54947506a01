//! Queen move generation
//!
//! Queens combine the rook's orthogonals with the bishop's diagonals.

use crate::board::Board;
use crate::piece::Piece;
use crate::square::Square;

use super::sliding::{ray_destinations, DIAGONAL, ORTHOGONAL};

/// Generate queen candidate destinations.
pub(crate) fn candidate_destinations(board: &Board, piece: &Piece) -> Vec<Square> {
    let mut moves = ray_destinations(board, piece.square(), piece.color, &ORTHOGONAL);
    moves.extend(ray_destinations(board, piece.square(), piece.color, &DIAGONAL));
    moves
}
