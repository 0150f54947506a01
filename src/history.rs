//! Move history and aggregate statistics
//!
//! Maintains a chronological record of every accepted action together with
//! running counters (total, classical vs quantum, superpositions,
//! entanglements, measurements).
//!
//! # Architecture
//!
//! [`MoveHistory`] owns a `Vec<MoveRecord>` plus a [`GameStats`] block that is
//! updated on every push, so counters never drift from the records they
//! summarize. Each record carries:
//!
//! - Sequence number and acting color
//! - The action classification ([`ActionKind`])
//! - Piece kind, origin and destination (where the action has them)
//! - Superposition target squares (split actions only)
//! - Captured piece kind (if any)
//!
//! A finished game condenses into a [`GameSummary`], the value handed to the
//! persistence collaborator. Everything here derives `Serialize` /
//! `Deserialize` so summaries travel as JSON.

use crate::square::Square;
use crate::types::{Color, PieceKind, Verdict};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of an accepted action for records and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Ordinary move or capture of a definite piece
    Classical,
    /// King-and-rook castle (either wing)
    Castle,
    /// Pawn capture of a just-double-stepped pawn
    EnPassant,
    /// Pawn promotion choice
    Promotion,
    /// Split of a definite piece into superposition
    Superposition,
    /// Entanglement of two superposed pieces
    Entanglement,
    /// Forced collapse of an own superposed piece
    Measurement,
    /// Teleport special power
    Teleport,
    /// Swap special power
    Swap,
    /// Clone special power
    Clone,
}

impl ActionKind {
    /// Whether this kind counts toward the quantum move counter.
    pub fn is_quantum(self) -> bool {
        matches!(
            self,
            ActionKind::Superposition
                | ActionKind::Entanglement
                | ActionKind::Measurement
                | ActionKind::Teleport
                | ActionKind::Swap
                | ActionKind::Clone
        )
    }
}

/// One accepted action in the order it was played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Sequence number, starting at 1
    pub move_number: u32,
    /// Side that acted
    pub color: Color,
    /// Action classification
    pub kind: ActionKind,
    /// Kind of the acting piece (for promotion, the chosen kind)
    pub piece: PieceKind,
    /// Origin square, where the action has one
    pub from: Option<Square>,
    /// Destination square, where the action has one
    pub to: Option<Square>,
    /// Superposition target squares (empty for every other kind)
    pub destinations: Vec<Square>,
    /// Kind of the captured piece, if the action captured
    pub captured: Option<PieceKind>,
}

/// Running counters over the recorded actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub total_moves: u32,
    pub classical_moves: u32,
    pub quantum_moves: u32,
    pub superpositions: u32,
    pub entanglements: u32,
    pub measurements: u32,
}

/// Ordered history of accepted actions with statistics kept in lockstep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
    stats: GameStats,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and update the counters it contributes to.
    pub(crate) fn push(&mut self, record: MoveRecord) {
        self.stats.total_moves += 1;
        if record.kind.is_quantum() {
            self.stats.quantum_moves += 1;
        } else {
            self.stats.classical_moves += 1;
        }
        match record.kind {
            ActionKind::Superposition => self.stats.superpositions += 1,
            ActionKind::Entanglement => self.stats.entanglements += 1,
            ActionKind::Measurement => self.stats.measurements += 1,
            _ => {}
        }
        self.records.push(record);
    }

    /// Sequence number the next accepted action will carry.
    pub fn next_number(&self) -> u32 {
        self.records.len() as u32 + 1
    }

    /// All records in the order they were played.
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// The most recent record, if any action has been accepted.
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Condensed result of a game, suitable for archiving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Identifier assigned when the game was created
    pub game_id: Uuid,
    /// Terminal state (or in-progress for an abandoned game)
    pub verdict: Verdict,
    /// Winning side, when the verdict has one
    pub winner: Option<Color>,
    /// Counter block at the time the summary was taken
    pub stats: GameStats,
    /// Full action history
    pub moves: Vec<MoveRecord>,
}
