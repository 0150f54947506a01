//! Legal move generation
//!
//! Per-piece-type destination enumeration against an explicit board snapshot,
//! plus the king-safety filter that rejects self-check moves.
//!
//! # Architecture
//!
//! Each piece kind has its own module producing *candidate* destinations from
//! occupancy alone: pawns ([`pawn`]), knights ([`knight`]), the sliding pieces
//! ([`rook`], [`bishop`], [`queen`] over the shared [`sliding`] ray caster),
//! and kings including castling ([`king`]). The dispatcher
//! [`legal_destinations`] then simulates every candidate on a hypothetical
//! board and drops the ones that leave the mover's own king in check.
//!
//! The `ignore_check_filter` flag turns the same generator into an attack
//! oracle: [`attack`] asks "which squares can this piece reach" without the
//! safety filter, which breaks the mutual recursion between generation and
//! check detection.
//!
//! Superposed pieces generate nothing — they cannot move classically and must
//! be measured first, which also means they never give check.

pub mod attack;
pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;
pub mod sliding;

pub use attack::{is_in_check, is_square_attacked};

use crate::board::Board;
use crate::piece::Piece;
use crate::square::Square;
use crate::types::{Color, PieceKind};
use std::collections::HashSet;

/// Every legal destination for one piece on the given board.
///
/// With `ignore_check_filter` set, candidates are returned without the
/// self-check simulation; that mode exists for attack scans and must never be
/// used to validate a player's move.
///
/// # Arguments
///
/// * `board` - Board snapshot to generate against
/// * `piece` - The piece to move; superposed pieces yield the empty set
/// * `en_passant` - Capture target square from the previous double step, if any
/// * `ignore_check_filter` - Skip king-safety simulation (attack scans only)
pub fn legal_destinations(
    board: &Board,
    piece: &Piece,
    en_passant: Option<Square>,
    ignore_check_filter: bool,
) -> HashSet<Square> {
    if piece.is_superposed() {
        return HashSet::new();
    }

    let candidates = match piece.kind {
        PieceKind::Pawn => pawn::candidate_destinations(board, piece, en_passant),
        PieceKind::Knight => knight::candidate_destinations(board, piece),
        PieceKind::Bishop => bishop::candidate_destinations(board, piece),
        PieceKind::Rook => rook::candidate_destinations(board, piece),
        PieceKind::Queen => queen::candidate_destinations(board, piece),
        // Castling is meaningless in an attack scan and would recurse into
        // further attack scans, so it is only generated for real moves.
        PieceKind::King => king::candidate_destinations(board, piece, !ignore_check_filter),
    };

    let from = piece.square();
    let mut legal = HashSet::with_capacity(candidates.len());
    for to in candidates {
        if ignore_check_filter {
            legal.insert(to);
            continue;
        }
        let extra = pawn::en_passant_victim(piece, from, to, en_passant);
        let hypothetical = board.simulate_move(piece.id, to, extra);
        if !attack::is_in_check(&hypothetical, piece.color) {
            legal.insert(to);
        }
    }
    legal
}

/// Whether the color has at least one legal destination across all of its
/// definite pieces. Superposed pieces are excluded from mobility.
pub fn has_any_move(board: &Board, color: Color, en_passant: Option<Square>) -> bool {
    board.pieces().iter().any(|piece| {
        piece.color == color
            && !piece.is_superposed()
            && !legal_destinations(board, piece, en_passant, false).is_empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn square(text: &str) -> Square {
        Square::parse(text).unwrap()
    }

    #[test]
    fn test_superposed_piece_generates_nothing() {
        //! Verifies superposed pieces cannot be moved classically
        let mut board = Board::empty();
        let id = board.place_superposed(
            PieceKind::Rook,
            Color::White,
            [square("a4"), square("e4")],
        );
        let piece = board.piece(id).unwrap();
        assert!(legal_destinations(&board, piece, None, false).is_empty());
        assert!(legal_destinations(&board, piece, None, true).is_empty());
    }

    #[test]
    fn test_pinned_piece_cannot_leave_the_line() {
        //! Tests the self-check filter against an absolute pin
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, square("e1"));
        let rook = board.place(PieceKind::Rook, Color::White, square("e4"));
        board.place(PieceKind::Rook, Color::Black, square("e8"));
        let piece = board.piece(rook).unwrap();
        let destinations = legal_destinations(&board, piece, None, false);
        assert!(destinations.contains(&square("e2")));
        assert!(destinations.contains(&square("e7")));
        assert!(
            destinations.contains(&square("e8")),
            "capturing the pinning rook stays on the line"
        );
        assert!(
            !destinations.contains(&square("a4")),
            "leaving the pin line would expose the king"
        );
    }

    #[test]
    fn test_check_must_be_answered() {
        //! Verifies only check-resolving destinations survive the filter
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, square("e1"));
        let bishop = board.place(PieceKind::Bishop, Color::White, square("c3"));
        board.place(PieceKind::Rook, Color::Black, square("e8"));
        board.place(PieceKind::King, Color::Black, square("h8"));
        let piece = board.piece(bishop).unwrap();
        let destinations = legal_destinations(&board, piece, None, false);
        // Only interposing on the e-file is allowed while the rook checks.
        assert!(destinations.contains(&square("e5")));
        assert!(!destinations.contains(&square("a5")));
        assert!(!destinations.contains(&square("b4")));
    }

    #[test]
    fn test_has_any_move_ignores_superposed_pieces() {
        //! Tests that mobility only counts definite pieces
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::Black, square("a8"));
        board.place(PieceKind::Queen, Color::White, square("c7"));
        board.place(PieceKind::King, Color::White, square("b6"));
        // A superposed black rook adds no mobility.
        board.place_superposed(
            PieceKind::Rook,
            Color::Black,
            [square("g2"), square("h3")],
        );
        assert!(!has_any_move(&board, Color::Black, None));
        assert!(has_any_move(&board, Color::White, None));
    }

    #[test]
    fn test_idempotent_destination_sets() {
        //! Verifies repeated queries over one board return identical sets
        let board = Board::standard();
        let knight = board.piece_at(square("b1")).unwrap();
        let first = legal_destinations(&board, knight, None, false);
        let second = legal_destinations(&board, knight, None, false);
        assert_eq!(first, second);
    }
}
