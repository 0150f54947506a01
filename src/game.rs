//! Game state and action application
//!
//! The authoritative state of one game and the single entry point for
//! changing it: [`Game::apply`] takes one [`Action`], validates it against
//! the current snapshot, and returns a brand-new [`Game`] plus the ordered
//! [`GameEvent`]s describing everything that happened. Rejections leave the
//! snapshot untouched.
//!
//! # Architecture
//!
//! Application is a pure function of `(game, action)`. Each handler:
//!
//! 1. Resolves the squares in the action to pieces under that action's
//!    selection rules (own/definite for classical moves and powers,
//!    own/superposed for measurement, any/superposed for entanglement)
//! 2. Validates against the error taxonomy, rejecting before any mutation
//!    becomes visible
//! 3. Applies the state change, co-moving rooks for castling and removing
//!    off-square victims for en passant
//! 4. Passes the turn, which records the move, runs the decay sweep over
//!    every superposed piece, and checks the new side to move for check,
//!    checkmate and stalemate
//!
//! The one exception to turn passage is a pawn reaching its promotion rank:
//! the game holds in a pending-promotion state, rejecting everything except
//! [`Action::Promote`], until the choice arrives.
//!
//! Quantum actions are not filtered for king safety, so a side may leave its
//! own king attacked; the opponent is then free to capture it, which ends
//! the game immediately.

use crate::board::Board;
use crate::constants::promotion_rank;
use crate::error::{ActionError, ActionResult};
use crate::history::{ActionKind, GameSummary, MoveHistory, MoveRecord};
use crate::move_gen;
use crate::piece::Piece;
use crate::quantum;
use crate::square::Square;
use crate::types::{Action, Color, GameEvent, PieceId, PieceKind, SpecialPower, Verdict};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;

/// A pawn move held open until the promotion kind arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    /// The pawn awaiting its new kind
    pub piece: PieceId,
    /// Origin of the promoting move
    pub from: Square,
    /// The promotion square the pawn now stands on
    pub to: Square,
    /// Kind captured by the promoting move, if any
    pub captured: Option<PieceKind>,
}

/// One color's remaining one-time special powers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PowerUses {
    teleport: bool,
    swap: bool,
    clone: bool,
}

impl PowerUses {
    fn used(&self, power: SpecialPower) -> bool {
        match power {
            SpecialPower::Teleport => self.teleport,
            SpecialPower::Swap => self.swap,
            SpecialPower::Clone => self.clone,
        }
    }

    fn mark(&mut self, power: SpecialPower) {
        match power {
            SpecialPower::Teleport => self.teleport = true,
            SpecialPower::Swap => self.swap = true,
            SpecialPower::Clone => self.clone = true,
        }
    }
}

/// Per-color ledger of spent special powers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PowerLedger {
    white: PowerUses,
    black: PowerUses,
}

impl PowerLedger {
    fn side(&self, color: Color) -> &PowerUses {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn side_mut(&mut self, color: Color) -> &mut PowerUses {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// Result of a successfully applied action.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The successor game state
    pub game: Game,
    /// Everything observable that happened, in occurrence order
    pub events: Vec<GameEvent>,
}

/// Complete state of one game
///
/// Cheap to clone; [`apply`](Game::apply) clones internally so callers keep
/// the pre-action snapshot on rejection and for history browsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    id: Uuid,
    board: Board,
    turn: Color,
    en_passant: Option<Square>,
    pending_promotion: Option<PendingPromotion>,
    powers: PowerLedger,
    history: MoveHistory,
    verdict: Verdict,
}

impl Game {
    /// Start a fresh game from the standard layout, White to move.
    pub fn new() -> Self {
        let game = Self::with_board(Board::standard(), Color::White);
        info!("[GAME] new game {}", game.id);
        game
    }

    /// Start from an arbitrary position, evaluating it for immediate
    /// termination.
    pub fn with_board(board: Board, turn: Color) -> Self {
        let verdict = terminal_verdict(&board, turn, None);
        Self {
            id: Uuid::new_v4(),
            board,
            turn,
            en_passant: None,
            pending_promotion: None,
            powers: PowerLedger::default(),
            history: MoveHistory::new(),
            verdict,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_over(&self) -> bool {
        self.verdict.is_over()
    }

    /// Square capturable en passant, set for exactly one reply after a pawn
    /// double-step.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// The promotion holding the game, if one is outstanding.
    pub fn pending_promotion(&self) -> Option<&PendingPromotion> {
        self.pending_promotion.as_ref()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Whether `color` may still play the given one-time power.
    pub fn power_available(&self, color: Color, power: SpecialPower) -> bool {
        !self.powers.side(color).used(power)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        move_gen::is_in_check(&self.board, color)
    }

    /// Legal destinations for the piece on `from`, for UI highlighting.
    ///
    /// Empty when the square holds no selectable piece for the side to move,
    /// or while the game is over or held by a pending promotion.
    pub fn legal_destinations(&self, from: Square) -> HashSet<Square> {
        if self.is_over() || self.pending_promotion.is_some() {
            return HashSet::new();
        }
        match self
            .board
            .pieces_at(from)
            .into_iter()
            .find(|piece| piece.color == self.turn && !piece.is_superposed())
        {
            Some(piece) => move_gen::legal_destinations(&self.board, piece, self.en_passant, false),
            None => HashSet::new(),
        }
    }

    /// Condense the game for archiving.
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            game_id: self.id,
            verdict: self.verdict,
            winner: self.verdict.winner(),
            stats: *self.history.stats(),
            moves: self.history.records().to_vec(),
        }
    }

    /// Apply one action using the thread-local random source.
    pub fn apply(&self, action: Action) -> ActionResult<Outcome> {
        self.apply_with_rng(action, &mut rand::rng())
    }

    /// Apply one action, drawing all randomness (collapse choices, decay
    /// rolls) from the given source.
    pub fn apply_with_rng(&self, action: Action, rng: &mut impl Rng) -> ActionResult<Outcome> {
        if self.is_over() {
            return Err(ActionError::InvalidSelection {
                message: "the game is already over".to_string(),
            });
        }
        if self.pending_promotion.is_some() && !matches!(action, Action::Promote { .. }) {
            return Err(ActionError::AmbiguousPendingPromotion);
        }

        let mut next = self.clone();
        let mut events = Vec::new();
        match action {
            Action::Move { from, to } => next.apply_move(from, to, rng, &mut events)?,
            Action::Superpose { from, first, second } => {
                next.apply_superpose(from, first, second, rng, &mut events)?
            }
            Action::Entangle { first, second } => {
                next.apply_entangle(first, second, rng, &mut events)?
            }
            Action::Measure { at } => next.apply_measure(at, rng, &mut events)?,
            Action::Teleport { from, to } => next.apply_teleport(from, to, rng, &mut events)?,
            Action::Swap { first, second } => next.apply_swap(first, second, rng, &mut events)?,
            Action::Clone { kind, at } => next.apply_clone(kind, at, rng, &mut events)?,
            Action::Promote { kind } => next.apply_promote(kind, rng, &mut events)?,
        }
        Ok(Outcome { game: next, events })
    }

    /// Resolve an own, definite piece on `square`.
    fn selected_definite(&self, square: Square) -> ActionResult<Piece> {
        self.board
            .pieces_at(square)
            .into_iter()
            .find(|piece| piece.color == self.turn && !piece.is_superposed())
            .cloned()
            .ok_or_else(|| ActionError::InvalidSelection {
                message: format!("no selectable {} piece on {square}", self.turn),
            })
    }

    /// Resolve a superposed piece of either color on `square`.
    fn superposed_at(&self, square: Square) -> ActionResult<Piece> {
        self.board
            .pieces_at(square)
            .into_iter()
            .find(|piece| piece.is_superposed())
            .cloned()
            .ok_or_else(|| ActionError::InvalidEntanglementTarget {
                message: format!("no superposed piece on {square}"),
            })
    }

    fn ensure_power(&self, power: SpecialPower) -> ActionResult<()> {
        if self.powers.side(self.turn).used(power) {
            return Err(ActionError::ActionAlreadyUsed {
                power,
                color: self.turn,
            });
        }
        Ok(())
    }

    /// Remove every enemy piece occupying `square`. Capturing any position
    /// of a superposed piece removes the whole piece.
    fn capture_enemies_at(&mut self, square: Square, mover: Color) -> Option<(PieceId, PieceKind)> {
        let victims: Vec<PieceId> = self
            .board
            .pieces_at(square)
            .into_iter()
            .filter(|piece| piece.color != mover)
            .map(|piece| piece.id)
            .collect();
        let mut captured = None;
        for id in victims {
            if let Some(victim) = self.board.remove(id) {
                info!("[RULES] captured {} {} at {square}", victim.color, victim.kind);
                captured = Some((victim.id, victim.kind));
            }
        }
        captured
    }

    fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> ActionResult<()> {
        let piece = self.selected_definite(from)?;
        let legal = move_gen::legal_destinations(&self.board, &piece, self.en_passant, false);
        if !legal.contains(&to) {
            return Err(ActionError::IllegalDestination { from, to });
        }

        let en_passant_before = self.en_passant.take();
        let mut record_kind = ActionKind::Classical;

        let destination_capture = self.capture_enemies_at(to, piece.color);
        let mut captured_kind = destination_capture.map(|(_, kind)| kind);

        // En passant: the victim pawn does not stand on the destination.
        let mut en_passant_event = None;
        if piece.kind == PieceKind::Pawn
            && en_passant_before == Some(to)
            && from.file() != to.file()
            && captured_kind.is_none()
        {
            let victim_square = Square::at(to.file(), from.rank());
            if let Some((victim_id, victim_kind)) =
                self.capture_enemies_at(victim_square, piece.color)
            {
                captured_kind = Some(victim_kind);
                record_kind = ActionKind::EnPassant;
                en_passant_event = Some(GameEvent::EnPassantCaptured {
                    pawn: victim_id,
                    at: victim_square,
                });
            }
        }

        if let Some(mover) = self.board.piece_mut(piece.id) {
            mover.positions = vec![to];
            mover.has_moved = true;
        }
        info!("[RULES] {} {} moved {from} to {to}", piece.color, piece.kind);
        events.push(GameEvent::Moved {
            piece: piece.id,
            kind: piece.kind,
            from,
            to,
        });
        if let Some((victim_id, victim_kind)) = destination_capture {
            events.push(GameEvent::Captured {
                piece: victim_id,
                kind: victim_kind,
                at: to,
            });
        }
        if let Some(event) = en_passant_event {
            events.push(event);
        }

        // Castling co-moves the rook in the same update.
        if piece.kind == PieceKind::King && from.file().abs_diff(to.file()) == 2 {
            record_kind = ActionKind::Castle;
            let home = from.rank();
            let (rook_from, rook_to) = if to.file() > from.file() {
                (Square::at(7, home), Square::at(5, home))
            } else {
                (Square::at(0, home), Square::at(3, home))
            };
            if let Some(rook_id) = self.board.piece_at(rook_from).map(|rook| rook.id) {
                if let Some(rook) = self.board.piece_mut(rook_id) {
                    rook.positions = vec![rook_to];
                    rook.has_moved = true;
                }
                events.push(GameEvent::CastleRookMoved {
                    rook: rook_id,
                    from: rook_from,
                    to: rook_to,
                });
            }
        }

        // A double-step opens the skipped square for one reply.
        if piece.kind == PieceKind::Pawn
            && from.file() == to.file()
            && from.rank().abs_diff(to.rank()) == 2
        {
            let skipped = Square::at(from.file(), (from.rank() + to.rank()) / 2);
            self.en_passant = Some(skipped);
        }

        // Promotion holds the game open; no turn passage until the choice.
        if piece.kind == PieceKind::Pawn && to.rank() == promotion_rank(piece.color) {
            self.pending_promotion = Some(PendingPromotion {
                piece: piece.id,
                from,
                to,
                captured: captured_kind,
            });
            events.push(GameEvent::PromotionPending {
                piece: piece.id,
                at: to,
            });
            info!("[GAME] {} pawn reached {to}, awaiting promotion choice", piece.color);
            return Ok(());
        }

        let record = MoveRecord {
            move_number: self.history.next_number(),
            color: piece.color,
            kind: record_kind,
            piece: piece.kind,
            from: Some(from),
            to: Some(to),
            destinations: Vec::new(),
            captured: captured_kind,
        };
        self.finish_turn(record, rng, events);
        Ok(())
    }

    fn apply_superpose(
        &mut self,
        from: Square,
        first: Square,
        second: Square,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> ActionResult<()> {
        let piece = self.selected_definite(from)?;
        if piece.kind == PieceKind::King {
            return Err(ActionError::InvalidSelection {
                message: "kings cannot enter superposition".to_string(),
            });
        }
        if first == second {
            return Err(ActionError::IllegalDestination { from, to: second });
        }
        for target in [first, second] {
            if target == from || !self.board.is_empty_square(target) {
                return Err(ActionError::IllegalDestination { from, to: target });
            }
        }

        self.en_passant = None;
        quantum::split(&mut self.board, piece.id, first, second);
        events.push(GameEvent::Superposed {
            piece: piece.id,
            from,
            first,
            second,
        });

        let record = MoveRecord {
            move_number: self.history.next_number(),
            color: piece.color,
            kind: ActionKind::Superposition,
            piece: piece.kind,
            from: Some(from),
            to: None,
            destinations: vec![first, second],
            captured: None,
        };
        self.finish_turn(record, rng, events);
        Ok(())
    }

    fn apply_entangle(
        &mut self,
        first: Square,
        second: Square,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> ActionResult<()> {
        let first_piece = self.superposed_at(first)?;
        let second_piece = self.superposed_at(second)?;
        if first_piece.id == second_piece.id {
            return Err(ActionError::InvalidEntanglementTarget {
                message: "both squares select the same piece".to_string(),
            });
        }

        self.en_passant = None;
        quantum::link(&mut self.board, first_piece.id, second_piece.id);
        events.push(GameEvent::Entangled {
            first: first_piece.id,
            second: second_piece.id,
        });

        let record = MoveRecord {
            move_number: self.history.next_number(),
            color: self.turn,
            kind: ActionKind::Entanglement,
            piece: first_piece.kind,
            from: Some(first),
            to: Some(second),
            destinations: Vec::new(),
            captured: None,
        };
        self.finish_turn(record, rng, events);
        Ok(())
    }

    fn apply_measure(
        &mut self,
        at: Square,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> ActionResult<()> {
        let piece = self
            .board
            .pieces_at(at)
            .into_iter()
            .find(|piece| piece.color == self.turn && piece.is_superposed())
            .cloned()
            .ok_or_else(|| ActionError::InvalidSelection {
                message: format!("no {} superposed piece on {at}", self.turn),
            })?;

        self.en_passant = None;
        quantum::measure(&mut self.board, piece.id, rng, events);
        let collapsed_to = self.board.piece(piece.id).map(|collapsed| collapsed.square());

        let record = MoveRecord {
            move_number: self.history.next_number(),
            color: piece.color,
            kind: ActionKind::Measurement,
            piece: piece.kind,
            from: Some(at),
            to: collapsed_to,
            destinations: Vec::new(),
            captured: None,
        };
        self.finish_turn(record, rng, events);
        Ok(())
    }

    fn apply_teleport(
        &mut self,
        from: Square,
        to: Square,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> ActionResult<()> {
        self.ensure_power(SpecialPower::Teleport)?;
        let piece = self.selected_definite(from)?;
        if !self.board.is_empty_square(to) {
            return Err(ActionError::IllegalDestination { from, to });
        }

        self.en_passant = None;
        self.powers.side_mut(self.turn).mark(SpecialPower::Teleport);
        if let Some(mover) = self.board.piece_mut(piece.id) {
            mover.positions = vec![to];
            mover.has_moved = true;
        }
        info!("[GAME] {} teleported {} from {from} to {to}", piece.color, piece.kind);
        events.push(GameEvent::Teleported {
            piece: piece.id,
            from,
            to,
        });

        let record = MoveRecord {
            move_number: self.history.next_number(),
            color: piece.color,
            kind: ActionKind::Teleport,
            piece: piece.kind,
            from: Some(from),
            to: Some(to),
            destinations: Vec::new(),
            captured: None,
        };
        self.finish_turn(record, rng, events);
        Ok(())
    }

    fn apply_swap(
        &mut self,
        first: Square,
        second: Square,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> ActionResult<()> {
        self.ensure_power(SpecialPower::Swap)?;
        let first_piece = self.selected_definite(first)?;
        let second_piece = self.selected_definite(second)?;
        if first_piece.id == second_piece.id {
            return Err(ActionError::InvalidSelection {
                message: "swap needs two different pieces".to_string(),
            });
        }

        self.en_passant = None;
        self.powers.side_mut(self.turn).mark(SpecialPower::Swap);
        if let Some(piece) = self.board.piece_mut(first_piece.id) {
            piece.positions = vec![second];
            piece.has_moved = true;
        }
        if let Some(piece) = self.board.piece_mut(second_piece.id) {
            piece.positions = vec![first];
            piece.has_moved = true;
        }
        info!("[GAME] {} swapped {first} and {second}", self.turn);
        events.push(GameEvent::Swapped {
            first: first_piece.id,
            second: second_piece.id,
        });

        let record = MoveRecord {
            move_number: self.history.next_number(),
            color: self.turn,
            kind: ActionKind::Swap,
            piece: first_piece.kind,
            from: Some(first),
            to: Some(second),
            destinations: Vec::new(),
            captured: None,
        };
        self.finish_turn(record, rng, events);
        Ok(())
    }

    fn apply_clone(
        &mut self,
        kind: PieceKind,
        at: Square,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> ActionResult<()> {
        self.ensure_power(SpecialPower::Clone)?;
        if kind == PieceKind::King {
            return Err(ActionError::InvalidSelection {
                message: "clone cannot create a king".to_string(),
            });
        }
        if !self.board.is_empty_square(at) {
            return Err(ActionError::InvalidSelection {
                message: format!("cannot clone onto occupied {at}"),
            });
        }

        self.en_passant = None;
        self.powers.side_mut(self.turn).mark(SpecialPower::Clone);
        let id = self.board.place(kind, self.turn, at);
        if let Some(clone) = self.board.piece_mut(id) {
            clone.has_moved = true;
        }
        info!("[GAME] {} cloned a {kind} onto {at}", self.turn);
        events.push(GameEvent::Cloned { piece: id, kind, at });

        let record = MoveRecord {
            move_number: self.history.next_number(),
            color: self.turn,
            kind: ActionKind::Clone,
            piece: kind,
            from: None,
            to: Some(at),
            destinations: Vec::new(),
            captured: None,
        };
        self.finish_turn(record, rng, events);
        Ok(())
    }

    fn apply_promote(
        &mut self,
        kind: PieceKind,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> ActionResult<()> {
        let pending = match self.pending_promotion {
            Some(pending) => pending,
            None => {
                return Err(ActionError::InvalidSelection {
                    message: "no promotion is outstanding".to_string(),
                })
            }
        };
        if !kind.is_promotion_choice() {
            return Err(ActionError::InvalidSelection {
                message: format!("cannot promote to {kind}"),
            });
        }

        self.pending_promotion = None;
        if let Some(piece) = self.board.piece_mut(pending.piece) {
            piece.kind = kind;
        }
        info!("[GAME] {} promoted the pawn on {} to {kind}", self.turn, pending.to);
        events.push(GameEvent::Promoted {
            piece: pending.piece,
            kind,
        });

        let record = MoveRecord {
            move_number: self.history.next_number(),
            color: self.turn,
            kind: ActionKind::Promotion,
            piece: kind,
            from: Some(pending.from),
            to: Some(pending.to),
            destinations: Vec::new(),
            captured: pending.captured,
        };
        self.finish_turn(record, rng, events);
        Ok(())
    }

    /// Record the move, flip the turn, run decay, and evaluate the new side
    /// to move for check and termination.
    fn finish_turn(&mut self, record: MoveRecord, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
        self.history.push(record);
        self.turn = self.turn.opposite();
        events.push(GameEvent::TurnPassed { next: self.turn });

        quantum::decay_sweep(&mut self.board, rng, events);

        // A king can be lost only through quantum play (quantum actions are
        // not king-safety filtered); the capture ends the game outright.
        if self.board.king(self.turn).is_none() {
            let verdict = Verdict::Checkmate {
                winner: self.turn.opposite(),
            };
            self.verdict = verdict;
            warn!("[GAME] {} has no king left", self.turn);
            events.push(GameEvent::GameOver { verdict });
            return;
        }

        if move_gen::is_in_check(&self.board, self.turn) {
            info!("[RULES] {} is in check", self.turn);
            events.push(GameEvent::Check { color: self.turn });
        }

        let verdict = terminal_verdict(&self.board, self.turn, self.en_passant);
        if verdict.is_over() {
            self.verdict = verdict;
            info!("[GAME] {}", verdict.message());
            events.push(GameEvent::GameOver { verdict });
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a position for the side to move: checkmate when it has no legal
/// destination and its king is attacked, stalemate when it has none and the
/// king is safe, in-progress otherwise.
pub fn terminal_verdict(board: &Board, to_move: Color, en_passant: Option<Square>) -> Verdict {
    if move_gen::has_any_move(board, to_move, en_passant) {
        return Verdict::InProgress;
    }
    if move_gen::is_in_check(board, to_move) {
        Verdict::Checkmate {
            winner: to_move.opposite(),
        }
    } else {
        Verdict::Stalemate
    }
}
