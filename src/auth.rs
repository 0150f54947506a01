//! Seat authorization for remote callers
//!
//! A multiplayer transport applies actions on behalf of two remote players.
//! The engine stays trust-agnostic: a [`SeatAuthority`] collaborator maps a
//! caller's token to the color it is seated as, and [`authorized_apply`]
//! rejects callers who are unknown or not the side to move before the normal
//! validation pipeline runs.

use crate::error::{ActionError, ActionResult};
use crate::game::{Game, Outcome};
use crate::types::{Action, Color};
use std::collections::HashMap;
use tracing::warn;

/// Collaborator identifying which color a caller may act as.
pub trait SeatAuthority {
    /// The seat held by `token`, `None` for unknown callers.
    fn seat(&self, token: &str) -> Option<Color>;
}

/// Static token table, enough for tests and local relays.
#[derive(Debug, Clone, Default)]
pub struct SeatTable {
    seats: HashMap<String, Color>,
}

impl SeatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat (or reseat) a token as the given color.
    pub fn assign(&mut self, token: impl Into<String>, color: Color) {
        self.seats.insert(token.into(), color);
    }
}

impl SeatAuthority for SeatTable {
    fn seat(&self, token: &str) -> Option<Color> {
        self.seats.get(token).copied()
    }
}

/// Apply an action on behalf of the caller identified by `token`.
pub fn authorized_apply(
    game: &Game,
    authority: &impl SeatAuthority,
    token: &str,
    action: Action,
) -> ActionResult<Outcome> {
    match authority.seat(token) {
        Some(color) if color == game.turn() => game.apply(action),
        Some(color) => {
            warn!("[GAME] {color} caller tried to act on {}'s turn", game.turn());
            Err(ActionError::InvalidSelection {
                message: format!("{color} cannot act on {}'s turn", game.turn()),
            })
        }
        None => Err(ActionError::InvalidSelection {
            message: "unknown caller".to_string(),
        }),
    }
}
