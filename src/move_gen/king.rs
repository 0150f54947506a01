//! King move generation
//!
//! ## King Movement Rules
//!
//! - One square in any of the eight directions
//! - Cannot land on a square occupied by an own piece
//! - Castling: two squares toward an unmoved rook on the home rank, when
//!   every square between king and rook is empty and the king neither starts
//!   on, passes through, nor lands on an attacked square
//!
//! Castling destinations are only generated for real moves, never inside
//! attack scans: a castle threatens nothing, and generating it there would
//! recurse into further attack scans.
//!
//! The self-check filter in the dispatcher applies to king steps like any
//! other move, so stepping into an attacked square is rejected there.

use crate::board::Board;
use crate::constants::home_rank;
use crate::piece::Piece;
use crate::square::Square;
use crate::types::{Color, PieceKind};

use super::attack::is_square_attacked;

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Generate king candidate destinations, optionally including castling.
pub(crate) fn candidate_destinations(
    board: &Board,
    piece: &Piece,
    include_castling: bool,
) -> Vec<Square> {
    let from = piece.square();
    let mut moves: Vec<Square> = KING_OFFSETS
        .iter()
        .filter_map(|&(file_delta, rank_delta)| from.offset(file_delta, rank_delta))
        .filter(|to| board.color_at(*to) != Some(piece.color))
        .collect();

    if include_castling {
        push_castling_destinations(board, piece, &mut moves);
    }
    moves
}

fn push_castling_destinations(board: &Board, king: &Piece, moves: &mut Vec<Square>) {
    if king.has_moved {
        return;
    }
    let rank = home_rank(king.color);
    if king.square() != Square::at(4, rank) {
        return;
    }

    // Kingside: rook on the h-file, f and g empty, e-f-g safe.
    if castling_rook_present(board, king.color, Square::at(7, rank))
        && board.is_empty_square(Square::at(5, rank))
        && board.is_empty_square(Square::at(6, rank))
        && transit_is_safe(
            board,
            king.color,
            [Square::at(4, rank), Square::at(5, rank), Square::at(6, rank)],
        )
    {
        moves.push(Square::at(6, rank));
    }

    // Queenside: rook on the a-file, b, c and d empty, e-d-c safe.
    if castling_rook_present(board, king.color, Square::at(0, rank))
        && board.is_empty_square(Square::at(1, rank))
        && board.is_empty_square(Square::at(2, rank))
        && board.is_empty_square(Square::at(3, rank))
        && transit_is_safe(
            board,
            king.color,
            [Square::at(4, rank), Square::at(3, rank), Square::at(2, rank)],
        )
    {
        moves.push(Square::at(2, rank));
    }
}

fn castling_rook_present(board: &Board, color: Color, corner: Square) -> bool {
    board.pieces().iter().any(|p| {
        p.kind == PieceKind::Rook
            && p.color == color
            && !p.has_moved
            && !p.is_superposed()
            && p.occupies(corner)
    })
}

fn transit_is_safe(board: &Board, color: Color, squares: [Square; 3]) -> bool {
    squares
        .iter()
        .all(|square| !is_square_attacked(board, *square, color.opposite()))
}
