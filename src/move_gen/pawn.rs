//! Pawn move generation
//!
//! ## Pawn Movement Rules
//!
//! - One square straight forward onto an empty square
//! - Two squares forward from the pawn rank when the pawn has never moved
//!   and both intervening squares are empty
//! - One square diagonally forward onto a square holding an opposing piece
//! - Diagonally onto the en-passant target square when the adjacent file
//!   holds the opposing pawn that just double-stepped
//!
//! Promotion is not a generation concern: reaching the far rank is an
//! ordinary destination here, and the game layer holds the move pending a
//! piece-type choice.

use crate::board::Board;
use crate::constants::{pawn_direction, pawn_rank};
use crate::piece::Piece;
use crate::square::Square;
use crate::types::PieceKind;

/// Generate pawn candidate destinations from occupancy alone.
pub(crate) fn candidate_destinations(
    board: &Board,
    piece: &Piece,
    en_passant: Option<Square>,
) -> Vec<Square> {
    let mut moves = Vec::new();
    let from = piece.square();
    let direction = pawn_direction(piece.color);

    // Forward pushes, blocked by any occupancy.
    if let Some(one) = from.offset(0, direction) {
        if board.is_empty_square(one) {
            moves.push(one);
            if !piece.has_moved && from.rank() == pawn_rank(piece.color) {
                if let Some(two) = one.offset(0, direction) {
                    if board.is_empty_square(two) {
                        moves.push(two);
                    }
                }
            }
        }
    }

    // Diagonal captures, normal and en passant.
    for file_delta in [-1, 1] {
        if let Some(target) = from.offset(file_delta, direction) {
            match board.color_at(target) {
                Some(occupant) if occupant != piece.color => moves.push(target),
                None if en_passant == Some(target)
                    && en_passant_pawn_present(board, piece, from, target) =>
                {
                    moves.push(target)
                }
                _ => {}
            }
        }
    }

    moves
}

/// The square of the pawn captured en passant, when `to` is such a capture.
///
/// En passant is the one move whose victim does not stand on the destination
/// square; the check filter and the executor both need this square to remove
/// the right pawn.
pub(crate) fn en_passant_victim(
    piece: &Piece,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> Option<Square> {
    if piece.kind == PieceKind::Pawn && en_passant == Some(to) && to.file() != from.file() {
        Square::new(to.file(), from.rank())
    } else {
        None
    }
}

fn en_passant_pawn_present(board: &Board, piece: &Piece, from: Square, target: Square) -> bool {
    match Square::new(target.file(), from.rank()) {
        Some(victim_square) => board
            .pieces_at(victim_square)
            .iter()
            .any(|p| p.kind == PieceKind::Pawn && p.color != piece.color),
        None => false,
    }
}
