//! Optional move suggestions from an external search service
//!
//! The engine never computes its own moves; a [`SuggestionService`] (a UCI
//! engine behind some transport, typically) can be asked for one. Hints are
//! advisory and never authoritative: the service sees only the lossy FEN
//! projection of a quantum position, so every reply is re-validated against
//! the real game before it reaches the caller.
//!
//! # Architecture
//!
//! [`HintClient`] wraps a service with the call policy: each attempt runs
//! under a hard deadline, a failed attempt (timeout or service error) is
//! retried exactly once, and a reply that parses but is malformed or illegal
//! is discarded as hint-unavailable without a retry. Game state is borrowed
//! immutably for the whole call, so nothing can mutate while a suggestion is
//! outstanding.

use crate::constants::{DEFAULT_MOVETIME, DEFAULT_SEARCH_DEPTH, HINT_TIMEOUT};
use crate::error::{HintError, HintResult};
use crate::game::Game;
use crate::square::Square;
use crate::types::{Action, PieceKind};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Search budget forwarded with every suggestion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum search depth in plies
    pub depth: u8,
    /// Thinking budget per search
    pub movetime: Duration,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            movetime: DEFAULT_MOVETIME,
        }
    }
}

/// External move-search collaborator.
///
/// Takes a FEN position and a budget and returns a coordinate-pair move
/// such as `e2e4` (optionally suffixed with a promotion letter, `e7e8q`).
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn best_move(&self, fen: &str, limits: SearchLimits) -> Result<String, HintError>;
}

/// Bounded, retrying client around a [`SuggestionService`].
pub struct HintClient<S> {
    service: S,
    deadline: Duration,
    limits: SearchLimits,
}

impl<S: SuggestionService> HintClient<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            deadline: HINT_TIMEOUT,
            limits: SearchLimits::default(),
        }
    }

    /// Replace the per-attempt deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Replace the search budget.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Ask for a hint for the side to move.
    ///
    /// Malformed or illegal replies surface as [`HintError::Unavailable`],
    /// never as a game error.
    pub async fn suggest(&self, game: &Game) -> HintResult<Action> {
        let fen = game.fen();
        let reply = self.call_with_retry(&fen).await?;
        let (from, to) = match parse_coordinate_move(&reply) {
            Some(parsed) => parsed,
            None => {
                return Err(HintError::Unavailable {
                    reason: format!("malformed suggestion {reply:?}"),
                })
            }
        };
        if !game.legal_destinations(from).contains(&to) {
            return Err(HintError::Unavailable {
                reason: format!("suggestion {reply:?} is not legal here"),
            });
        }
        info!("[HINT] suggesting {from} to {to}");
        Ok(Action::Move { from, to })
    }

    async fn call_with_retry(&self, fen: &str) -> HintResult<String> {
        match self.call_once(fen).await {
            Ok(reply) => Ok(reply),
            Err(first) => {
                warn!("[HINT] attempt failed ({first}), retrying once");
                self.call_once(fen).await
            }
        }
    }

    async fn call_once(&self, fen: &str) -> HintResult<String> {
        match timeout(self.deadline, self.service.best_move(fen, self.limits)).await {
            Ok(result) => result,
            Err(_) => Err(HintError::Timeout {
                waited: self.deadline,
            }),
        }
    }
}

/// Parse a coordinate-pair reply, validating any promotion suffix.
fn parse_coordinate_move(reply: &str) -> Option<(Square, Square)> {
    let trimmed = reply.trim();
    if !trimmed.is_ascii() || !(4..=5).contains(&trimmed.len()) {
        return None;
    }
    let from = Square::parse(&trimmed[0..2])?;
    let to = Square::parse(&trimmed[2..4])?;
    if trimmed.len() == 5 {
        promotion_kind(trimmed.as_bytes()[4] as char)?;
    }
    Some((from, to))
}

fn promotion_kind(letter: char) -> Option<PieceKind> {
    match letter.to_ascii_lowercase() {
        'q' => Some(PieceKind::Queen),
        'r' => Some(PieceKind::Rook),
        'b' => Some(PieceKind::Bishop),
        'n' => Some(PieceKind::Knight),
        _ => None,
    }
}
