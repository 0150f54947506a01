//! Rook move generation
//!
//! Rooks slide along ranks and files until blocked.

use crate::board::Board;
use crate::piece::Piece;
use crate::square::Square;

use super::sliding::{ray_destinations, ORTHOGONAL};

/// Generate rook candidate destinations.
pub(crate) fn candidate_destinations(board: &Board, piece: &Piece) -> Vec<Square> {
    ray_destinations(board, piece.square(), piece.color, &ORTHOGONAL)
}
