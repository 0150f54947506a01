//! Sliding piece move generation
//!
//! Common ray casting for bishops, rooks and queens: walk each direction one
//! square at a time, collecting empty squares, and stop at the first occupied
//! square — including it when the occupant is an opposing piece.
//!
//! Superposed ghost positions count as occupancy here, so a ghost square
//! blocks a ray exactly like a definite piece and can itself be captured
//! (removing the whole superposed piece).

use crate::board::Board;
use crate::square::Square;
use crate::types::Color;

/// Rook directions: the four orthogonals.
pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Bishop directions: the four diagonals.
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Cast rays from `from` in each direction, collecting reachable squares.
pub(crate) fn ray_destinations(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
) -> Vec<Square> {
    let mut moves = Vec::new();
    for &(file_delta, rank_delta) in directions {
        let mut current = from;
        while let Some(next) = current.offset(file_delta, rank_delta) {
            match board.color_at(next) {
                None => {
                    moves.push(next);
                    current = next;
                }
                Some(occupant) => {
                    if occupant != color {
                        moves.push(next);
                    }
                    break;
                }
            }
        }
    }
    moves
}
