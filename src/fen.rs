//! FEN projection for the suggestion collaborator
//!
//! The move-suggestion service speaks plain chess, so a quantum position is
//! projected before asking: a superposed piece counts as standing on its
//! first position, castling rights fall out of `has_moved`, and the
//! en-passant target carries over. The projection is lossy, which is why a
//! returned hint is only advisory and is re-validated against the real
//! position before being surfaced.

use crate::board::Board;
use crate::constants::{home_rank, BOARD_SIZE};
use crate::game::Game;
use crate::square::Square;
use crate::types::{Color, PieceKind};

impl Game {
    /// FEN projection of the current position.
    pub fn fen(&self) -> String {
        let fullmove = self.history().len() as u32 / 2 + 1;
        encode(self.board(), self.turn(), self.en_passant_target(), fullmove)
    }
}

/// Encode a board as the six FEN fields.
///
/// The halfmove clock is not tracked and always encodes as zero.
pub fn encode(board: &Board, turn: Color, en_passant: Option<Square>, fullmove: u32) -> String {
    let mut placement = String::new();
    for rank in (0..BOARD_SIZE).rev() {
        let mut empty_run = 0u8;
        for file in 0..BOARD_SIZE {
            match projected_piece(board, Square::at(file, rank)) {
                Some((kind, color)) => {
                    if empty_run > 0 {
                        placement.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    placement.push(kind.fen_char(color));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            placement.push(char::from(b'0' + empty_run));
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    let active = match turn {
        Color::White => 'w',
        Color::Black => 'b',
    };
    let castling = castling_field(board);
    let target = en_passant.map_or_else(|| "-".to_string(), |square| square.to_string());

    format!("{placement} {active} {castling} {target} 0 {fullmove}")
}

/// The piece projected onto `square`: first position wins for ghosts.
fn projected_piece(board: &Board, square: Square) -> Option<(PieceKind, Color)> {
    board
        .pieces()
        .iter()
        .find(|piece| piece.square() == square)
        .map(|piece| (piece.kind, piece.color))
}

fn castling_field(board: &Board) -> String {
    let mut field = String::new();
    for (color, kingside, queenside) in [(Color::White, 'K', 'Q'), (Color::Black, 'k', 'q')] {
        let home = home_rank(color);
        let king_ready = board.piece_at(Square::at(4, home)).is_some_and(|piece| {
            piece.kind == PieceKind::King
                && piece.color == color
                && !piece.has_moved
                && !piece.is_superposed()
        });
        if !king_ready {
            continue;
        }
        if corner_rook_ready(board, color, 7) {
            field.push(kingside);
        }
        if corner_rook_ready(board, color, 0) {
            field.push(queenside);
        }
    }
    if field.is_empty() {
        field.push('-');
    }
    field
}

fn corner_rook_ready(board: &Board, color: Color, file: u8) -> bool {
    board
        .piece_at(Square::at(file, home_rank(color)))
        .is_some_and(|piece| {
            piece.kind == PieceKind::Rook
                && piece.color == color
                && !piece.has_moved
                && !piece.is_superposed()
        })
}
