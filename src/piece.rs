//! The piece record
//!
//! A [`Piece`] carries its identity, kind, color, the squares it currently
//! occupies, its entanglement links, and the `has_moved` flag consulted by
//! castling and pawn double-step rules.
//!
//! # Invariants
//!
//! - `positions` is never empty and never holds duplicate squares; length 1
//!   means classical (definite), length 2 means superposed.
//! - `entangled_with` only ever names pieces that are themselves superposed;
//!   links are cleared symmetrically whenever either side collapses.
//! - Kings never appear with more than one position.

use crate::square::Square;
use crate::types::{Color, PieceId, PieceKind};
use serde::{Deserialize, Serialize};

/// A live piece on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Stable identifier, unique for the lifetime of the game
    pub id: PieceId,
    /// Piece kind; changes only through promotion
    pub kind: PieceKind,
    /// Owning color
    pub color: Color,
    /// Squares this piece occupies; one square = definite, two = superposed
    pub positions: Vec<Square>,
    /// Identifiers of entangled partner pieces
    pub entangled_with: Vec<PieceId>,
    /// Whether the piece has moved, teleported or swapped this game
    pub has_moved: bool,
}

impl Piece {
    /// Create a definite piece on a single square.
    pub fn new(id: PieceId, kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            id,
            kind,
            color,
            positions: vec![square],
            entangled_with: Vec::new(),
            has_moved: false,
        }
    }

    /// Whether the piece currently occupies more than one square.
    pub fn is_superposed(&self) -> bool {
        self.positions.len() > 1
    }

    /// Whether the piece is linked to at least one entangled partner.
    pub fn is_entangled(&self) -> bool {
        !self.entangled_with.is_empty()
    }

    /// Whether any of the piece's positions is the given square.
    pub fn occupies(&self, square: Square) -> bool {
        self.positions.contains(&square)
    }

    /// The piece's square.
    ///
    /// For a superposed piece this is its first position, the projection used
    /// for king lookup and FEN encoding.
    pub fn square(&self) -> Square {
        self.positions[0]
    }
}
