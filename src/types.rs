//! Core types shared across the engine
//!
//! Piece colors and kinds, stable piece identifiers, the tagged [`Action`]
//! input alphabet, the [`GameEvent`] output alphabet emitted by applying an
//! action, and the terminal [`Verdict`] of a game.
//!
//! # Architecture
//!
//! Actions flow in, events flow out: callers submit one [`Action`] against an
//! immutable game snapshot and receive either the successor state plus the
//! ordered list of [`GameEvent`]s describing everything that happened
//! (captures, collapses, turn passage, termination) or a rejection that left
//! the snapshot untouched.

use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The opposing color.
    pub const fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Whether a pawn may promote to this kind.
    pub const fn is_promotion_choice(&self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// FEN letter for this kind in the given color (uppercase = White).
    pub const fn fen_char(&self, color: Color) -> char {
        let lower = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => lower.to_ascii_uppercase(),
            Color::Black => lower,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        write!(f, "{name}")
    }
}

/// Stable identity of a piece for its whole lifetime
///
/// Identifiers are assigned by the board when a piece enters play and are
/// never reused, so entanglement links and event streams stay unambiguous
/// even after captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three once-per-color-per-game special actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialPower {
    Teleport,
    Swap,
    Clone,
}

impl fmt::Display for SpecialPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialPower::Teleport => write!(f, "Teleport"),
            SpecialPower::Swap => write!(f, "Swap"),
            SpecialPower::Clone => write!(f, "Clone"),
        }
    }
}

/// One player input, validated and applied atomically
///
/// Squares identify pieces: the engine resolves the piece occupying the
/// square under the rules of the action (own/definite for classical moves,
/// own/superposed for measurement, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Classical move, including castling, en passant and the moves that
    /// trigger promotion
    Move { from: Square, to: Square },
    /// Split one definite piece across two empty squares
    Superpose {
        from: Square,
        first: Square,
        second: Square,
    },
    /// Link the collapse fates of two superposed pieces
    Entangle { first: Square, second: Square },
    /// Collapse an own superposed piece to a single random position
    Measure { at: Square },
    /// Relocate one definite own piece to any empty square (once per game)
    Teleport { from: Square, to: Square },
    /// Exchange the squares of two definite own pieces (once per game)
    Swap { first: Square, second: Square },
    /// Create a new own piece of the given kind on an empty square
    /// (once per game)
    Clone { kind: PieceKind, at: Square },
    /// Resolve an outstanding promotion with the chosen kind
    Promote { kind: PieceKind },
}

/// Why a superposed piece collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollapseCause {
    /// A player measured the piece directly
    Measured,
    /// The piece failed its per-turn decay roll
    Decayed,
    /// An entangled partner collapsed and dragged this piece with it
    Entangled,
}

/// Everything observable that happened while applying one action
///
/// Emitted in occurrence order; relays broadcast these to spectators and the
/// archive derives records from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Moved {
        piece: PieceId,
        kind: PieceKind,
        from: Square,
        to: Square,
    },
    Captured {
        piece: PieceId,
        kind: PieceKind,
        at: Square,
    },
    CastleRookMoved {
        rook: PieceId,
        from: Square,
        to: Square,
    },
    EnPassantCaptured {
        pawn: PieceId,
        at: Square,
    },
    Superposed {
        piece: PieceId,
        from: Square,
        first: Square,
        second: Square,
    },
    Entangled {
        first: PieceId,
        second: PieceId,
    },
    Collapsed {
        piece: PieceId,
        at: Square,
        cause: CollapseCause,
    },
    PromotionPending {
        piece: PieceId,
        at: Square,
    },
    Promoted {
        piece: PieceId,
        kind: PieceKind,
    },
    Teleported {
        piece: PieceId,
        from: Square,
        to: Square,
    },
    Swapped {
        first: PieceId,
        second: PieceId,
    },
    Cloned {
        piece: PieceId,
        kind: PieceKind,
        at: Square,
    },
    TurnPassed {
        next: Color,
    },
    Check {
        color: Color,
    },
    GameOver {
        verdict: Verdict,
    },
}

/// Terminal state of a game
///
/// Starts as `InProgress` and becomes terminal when the side to move has no
/// legal destination across all of its definite pieces: checkmate when its
/// king is attacked, stalemate otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verdict {
    /// The game continues
    #[default]
    InProgress,
    /// The losing side's king was mated; `winner` is the other color
    Checkmate { winner: Color },
    /// Draw: the side to move has no moves but is not in check
    Stalemate,
}

impl Verdict {
    /// Check whether the game has ended.
    pub fn is_over(&self) -> bool {
        !matches!(self, Verdict::InProgress)
    }

    /// The winning color, `None` for draws and ongoing games.
    pub fn winner(&self) -> Option<Color> {
        match self {
            Verdict::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }

    /// Check whether the game ended in a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Verdict::Stalemate)
    }

    /// Human-readable result message.
    pub fn message(&self) -> String {
        match self {
            Verdict::InProgress => "Game in progress".to_string(),
            Verdict::Checkmate { winner } => format!("{winner} wins by checkmate!"),
            Verdict::Stalemate => "Draw by stalemate".to_string(),
        }
    }
}
