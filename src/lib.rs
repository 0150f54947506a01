//! Quantum chess rules engine
//!
//! Standard chess movement with three non-classical piece states layered on
//! top: superposition (one piece on two squares at once), entanglement
//! (linked collapse fates) and measurement (forced random collapse), plus a
//! passive decay that erodes superposition after every turn. Three one-time
//! special powers per color (teleport, swap, clone) round out the variant.
//!
//! # Module Organization
//!
//! - `square` / `types` / `piece` / `board` - The data model: squares,
//!   colors and kinds, stable piece identities, and the board as the sole
//!   state needed to compute legality
//! - `move_gen` - Per-kind legal destination enumeration with check-safety
//!   filtering, castling and en passant
//! - `game` - Action validation and application, turn flow, promotion
//!   holding, terminal detection
//! - `history` - Move records, running statistics, game summaries
//! - `fen` - Lossy FEN projection of a quantum position
//! - `hint` / `archive` / `auth` - External collaborator boundaries: move
//!   suggestions, persistence, seat authorization
//!
//! # Architecture
//!
//! Applying an action is a pure function: [`Game::apply`] consumes nothing,
//! validates the action against the current snapshot, and returns a new
//! [`Game`] plus the [`GameEvent`]s describing what happened. Rejected
//! actions leave the snapshot untouched and report one of the
//! [`ActionError`] reasons. All randomness (collapse choices, decay rolls)
//! can be injected for deterministic play.

pub mod archive;
pub mod auth;
pub mod board;
pub mod constants;
pub mod error;
pub mod fen;
pub mod game;
pub mod hint;
pub mod history;
pub mod move_gen;
pub mod piece;
pub mod square;
pub mod types;

mod quantum;

// Re-export the main entry points
pub use archive::{GameArchive, MemoryArchive};
pub use auth::{authorized_apply, SeatAuthority, SeatTable};
pub use board::Board;
pub use error::{
    ActionError, ActionResult, ArchiveError, ArchiveResult, HintError, HintResult,
};
pub use game::{terminal_verdict, Game, Outcome, PendingPromotion};
pub use hint::{HintClient, SearchLimits, SuggestionService};
pub use history::{ActionKind, GameStats, GameSummary, MoveHistory, MoveRecord};
pub use move_gen::{is_in_check, is_square_attacked};
pub use piece::Piece;
pub use square::Square;
pub use types::{
    Action, CollapseCause, Color, GameEvent, PieceId, PieceKind, SpecialPower, Verdict,
};
