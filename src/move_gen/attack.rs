//! Attack detection and check queries
//!
//! A square is attacked by a color when any of that color's pieces lists it
//! among its destinations with the check filter disabled; check is that test
//! against the king's square. Running the scan with `ignore_check_filter`
//! set is what breaks the mutual recursion between the generator and this
//! module.
//!
//! Superposed pieces never attack: they cannot move until measured, so their
//! destination sets are empty by definition.

use crate::board::Board;
use crate::square::Square;
use crate::types::Color;

use super::legal_destinations;

/// Whether any piece of `by` can reach `square` on the given board.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    board
        .pieces()
        .iter()
        .filter(|piece| piece.color == by)
        .any(|piece| legal_destinations(board, piece, None, true).contains(&square))
}

/// Whether the color's king is currently attacked.
///
/// A board without that king (possible only through quantum play) is treated
/// as not in check; termination is handled by the game layer.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(square) => is_square_attacked(board, square, color.opposite()),
        None => false,
    }
}
