//! Knight move generation
//!
//! Knights jump in the eight L-shaped offsets, ignoring every piece in
//! between; only board bounds and same-color occupancy filter the set.

use crate::board::Board;
use crate::piece::Piece;
use crate::square::Square;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Generate knight candidate destinations.
pub(crate) fn candidate_destinations(board: &Board, piece: &Piece) -> Vec<Square> {
    let from = piece.square();
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(file_delta, rank_delta)| from.offset(file_delta, rank_delta))
        .filter(|to| board.color_at(*to) != Some(piece.color))
        .collect()
}
