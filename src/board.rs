//! Authoritative board model
//!
//! The [`Board`] is the complete set of live pieces at a point in time and is
//! the sole state needed to compute legality. It is pure data plus accessors:
//! occupancy queries answer "which pieces occupy this square" (two or more
//! are possible once superposition is in play), and [`Board::simulate_move`]
//! produces the hypothetical successor used for king-safety tests without
//! touching the real game state.
//!
//! No validation logic lives here; the move generator and the game layer own
//! the rules.

use crate::constants::{
    BACK_RANK, BLACK_HOME_RANK, BLACK_PAWN_RANK, BOARD_SIZE, WHITE_HOME_RANK, WHITE_PAWN_RANK,
};
use crate::piece::Piece;
use crate::square::Square;
use crate::types::{Color, PieceId, PieceKind};
use serde::{Deserialize, Serialize};

/// The set of live pieces making up one position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pieces: Vec<Piece>,
    next_id: u32,
}

impl Board {
    /// An empty board with no pieces.
    pub fn empty() -> Self {
        Self {
            pieces: Vec::new(),
            next_id: 1,
        }
    }

    /// The standard 32-piece starting position.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for file in 0..BOARD_SIZE {
            board.place(
                BACK_RANK[file as usize],
                Color::White,
                Square::at(file, WHITE_HOME_RANK),
            );
        }
        for file in 0..BOARD_SIZE {
            board.place(PieceKind::Pawn, Color::White, Square::at(file, WHITE_PAWN_RANK));
        }
        for file in 0..BOARD_SIZE {
            board.place(
                BACK_RANK[file as usize],
                Color::Black,
                Square::at(file, BLACK_HOME_RANK),
            );
        }
        for file in 0..BOARD_SIZE {
            board.place(PieceKind::Pawn, Color::Black, Square::at(file, BLACK_PAWN_RANK));
        }
        board
    }

    /// Place a new definite piece, returning its identifier.
    ///
    /// Used for the initial layout, the clone special action, and scenario
    /// setup in analysis tools and tests.
    pub fn place(&mut self, kind: PieceKind, color: Color, square: Square) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push(Piece::new(id, kind, color, square));
        id
    }

    /// Place a new piece already in superposition across two squares.
    pub fn place_superposed(
        &mut self,
        kind: PieceKind,
        color: Color,
        positions: [Square; 2],
    ) -> PieceId {
        let id = self.place(kind, color, positions[0]);
        if let Some(piece) = self.piece_mut(id) {
            piece.positions = positions.to_vec();
        }
        id
    }

    /// All live pieces in placement order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Look up a piece by identifier.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    /// All pieces occupying a square: zero, one, or several once
    /// superposition overlaps come into play.
    pub fn pieces_at(&self, square: Square) -> Vec<&Piece> {
        self.pieces.iter().filter(|p| p.occupies(square)).collect()
    }

    /// The first piece occupying a square.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.occupies(square))
    }

    /// Color of the first occupant of a square.
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|p| p.color)
    }

    /// Whether no piece occupies the square, ghost positions included.
    pub fn is_empty_square(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Whether any occupant of the square is superposed.
    pub fn is_square_superposed(&self, square: Square) -> bool {
        self.pieces
            .iter()
            .any(|p| p.is_superposed() && p.occupies(square))
    }

    /// Whether any occupant of the square is entangled.
    pub fn is_square_entangled(&self, square: Square) -> bool {
        self.pieces
            .iter()
            .any(|p| p.is_entangled() && p.occupies(square))
    }

    /// The king of the given color, if still alive.
    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.kind == PieceKind::King && p.color == color)
    }

    /// The king's square; kings never superpose, so this is unambiguous.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king(color).map(|p| p.square())
    }

    pub(crate) fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.id == id)?;
        let removed = self.pieces.remove(index);
        // Drop dangling entanglement links to the removed piece.
        for piece in &mut self.pieces {
            piece.entangled_with.retain(|other| *other != id);
        }
        Some(removed)
    }

    /// Hypothetical successor with one piece moved and captures resolved.
    ///
    /// Every enemy piece occupying `to` (and `extra_capture`, for en passant)
    /// is removed whole, then the mover lands on `to` as a definite piece.
    /// The receiver is untouched, which is what lets the check filter probe
    /// candidate moves safely.
    pub fn simulate_move(&self, id: PieceId, to: Square, extra_capture: Option<Square>) -> Board {
        let mut next = self.clone();
        let mover_color = match next.piece(id) {
            Some(piece) => piece.color,
            None => return next,
        };
        next.remove_enemies_at(to, mover_color);
        if let Some(square) = extra_capture {
            next.remove_enemies_at(square, mover_color);
        }
        if let Some(piece) = next.piece_mut(id) {
            piece.positions = vec![to];
        }
        next
    }

    fn remove_enemies_at(&mut self, square: Square, friendly: Color) {
        let victims: Vec<PieceId> = self
            .pieces
            .iter()
            .filter(|p| p.color != friendly && p.occupies(square))
            .map(|p| p.id)
            .collect();
        for id in victims {
            self.remove(id);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
