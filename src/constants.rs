//! # Engine Constants - Board Geometry & Quantum Tuning
//!
//! Centralizes the constant values used throughout the rules engine: board
//! dimensions, the standard starting back rank, per-color home and promotion
//! ranks, the passive decay probability applied to superposed pieces, and the
//! budgets used when consulting the external move-suggestion service.
//!
//! ## Decay Probability
//!
//! After every turn transition each superposed piece is rolled independently
//! against [`DECAY_PROBABILITY`]. A piece survives `n` turns in superposition
//! with probability `0.75^n`, so superposition is a short-lived resource a
//! player should entangle or measure deliberately rather than bank on.

use crate::types::{Color, PieceKind};
use std::time::Duration;

/// Number of files and ranks on the board.
pub const BOARD_SIZE: u8 = 8;

/// Piece layout of the back rank, indexed by file (a-file first).
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Rank index of White's back rank (rank 1).
pub const WHITE_HOME_RANK: u8 = 0;

/// Rank index of White's pawn rank (rank 2).
pub const WHITE_PAWN_RANK: u8 = 1;

/// Rank index of Black's pawn rank (rank 7).
pub const BLACK_PAWN_RANK: u8 = 6;

/// Rank index of Black's back rank (rank 8).
pub const BLACK_HOME_RANK: u8 = 7;

/// Back rank index for the given color.
pub const fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => WHITE_HOME_RANK,
        Color::Black => BLACK_HOME_RANK,
    }
}

/// Pawn starting rank index for the given color.
pub const fn pawn_rank(color: Color) -> u8 {
    match color {
        Color::White => WHITE_PAWN_RANK,
        Color::Black => BLACK_PAWN_RANK,
    }
}

/// Far rank index at which the color's pawns promote.
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => BLACK_HOME_RANK,
        Color::Black => WHITE_HOME_RANK,
    }
}

/// Forward rank delta for the color's pawns.
pub const fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Maximum number of squares a single piece may occupy at once.
pub const SUPERPOSITION_WIDTH: usize = 2;

/// Probability that a superposed piece collapses on any given turn transition.
pub const DECAY_PROBABILITY: f64 = 0.25;

/// Hard deadline for a single call to the move-suggestion service.
pub const HINT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default search depth requested from the move-suggestion service.
pub const DEFAULT_SEARCH_DEPTH: u8 = 10;

/// Default per-search thinking budget requested from the suggestion service.
pub const DEFAULT_MOVETIME: Duration = Duration::from_millis(1000);
