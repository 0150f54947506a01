//! Error types for the quantum chess engine
//!
//! Provides custom error types for action validation, the move-suggestion
//! client, and the game archive boundary. Every rejection leaves the board
//! untouched; callers receive the reason and re-prompt.

use crate::square::Square;
use crate::types::{Color, SpecialPower};
use std::time::Duration;
use thiserror::Error;

/// Errors produced when an action is rejected by the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// No movable piece at the chosen square, or wrong side to move
    #[error("Invalid selection: {message}")]
    InvalidSelection { message: String },

    /// Destination not in the legal set, including self-check violations
    #[error("Illegal destination {to} for the piece on {from}")]
    IllegalDestination { from: Square, to: Square },

    /// An action was submitted while a promotion choice is outstanding
    #[error("A promotion choice is outstanding; supply it before acting")]
    AmbiguousPendingPromotion,

    /// A once-per-game special action was attempted a second time
    #[error("{power} has already been used by {color}")]
    ActionAlreadyUsed { power: SpecialPower, color: Color },

    /// Entanglement target is not superposed, or the same piece was picked twice
    #[error("Invalid entanglement target: {message}")]
    InvalidEntanglementTarget { message: String },
}

/// Result type alias for engine actions and queries
pub type ActionResult<T> = Result<T, ActionError>;

/// Errors surfaced by the move-suggestion client
///
/// Never fatal to a game: a failed or malformed suggestion simply means no
/// hint is shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HintError {
    /// The suggestion service did not answer within the deadline
    #[error("Suggestion service timed out after {waited:?}")]
    Timeout { waited: Duration },

    /// The service failed, or its reply was malformed or illegal
    #[error("Hint unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Result type alias for suggestion-service calls
pub type HintResult<T> = Result<T, HintError>;

/// Errors produced by the game archive boundary
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The game summary could not be encoded for storage
    #[error("Failed to encode game summary: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The storage backend rejected the record
    #[error("Storage rejected the game: {message}")]
    Storage { message: String },
}

/// Result type alias for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;
