//! Quantum state transitions
//!
//! The four non-classical state changes layered over the chess rules:
//!
//! - **Split** replaces one definite piece's position with exactly two
//!   positions, putting it in superposition.
//! - **Link** entangles two superposed pieces so their collapse fates are
//!   tied together.
//! - **Measurement** collapses a superposed piece to one of its positions,
//!   chosen uniformly at random.
//! - **Decay** rolls every superposed piece once per turn transition and
//!   collapses the losers the same way measurement would.
//!
//! # Correlated Collapse
//!
//! Whenever a piece collapses — measured or decayed — every entangled
//! partner collapses in the same update: to its position at the *same index*
//! the triggering piece collapsed to when that index exists, otherwise to a
//! fresh uniform choice. Entanglement links are cleared symmetrically as each
//! piece settles, and chains (A-B, B-C) collapse transitively. One
//! measurement therefore resolves an entire entangled cluster.
//!
//! Validation lives in the game layer; functions here assume their inputs
//! were vetted and only perform the state change.

use crate::board::Board;
use crate::constants::DECAY_PROBABILITY;
use crate::square::Square;
use crate::types::{CollapseCause, GameEvent, PieceId};
use rand::Rng;
use tracing::{debug, info};

/// Put a definite piece into superposition across two squares.
pub(crate) fn split(board: &mut Board, id: PieceId, first: Square, second: Square) {
    if let Some(piece) = board.piece_mut(id) {
        piece.positions = vec![first, second];
        info!("[QUANTUM] {} {} split across {first} and {second}", piece.color, piece.kind);
    }
}

/// Entangle two superposed pieces, linking their collapse fates.
pub(crate) fn link(board: &mut Board, first: PieceId, second: PieceId) {
    if let Some(piece) = board.piece_mut(first) {
        if !piece.entangled_with.contains(&second) {
            piece.entangled_with.push(second);
        }
    }
    if let Some(piece) = board.piece_mut(second) {
        if !piece.entangled_with.contains(&first) {
            piece.entangled_with.push(first);
        }
    }
    info!("[QUANTUM] entangled {first} with {second}");
}

/// Collapse a superposed piece to a uniformly random position.
pub(crate) fn measure(
    board: &mut Board,
    id: PieceId,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let count = match board.piece(id) {
        Some(piece) if piece.is_superposed() => piece.positions.len(),
        _ => return,
    };
    let index = rng.random_range(0..count);
    settle(board, id, index, CollapseCause::Measured, rng, events);
}

/// Roll every superposed piece against the decay probability once.
///
/// Runs after each turn transition. Pieces collapsed mid-sweep by a
/// partner's propagation are skipped; nothing rolls twice.
pub(crate) fn decay_sweep(board: &mut Board, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let candidates: Vec<PieceId> = board
        .pieces()
        .iter()
        .filter(|piece| piece.is_superposed())
        .map(|piece| piece.id)
        .collect();

    for id in candidates {
        let count = match board.piece(id) {
            Some(piece) if piece.is_superposed() => piece.positions.len(),
            _ => continue,
        };
        if !rng.random_bool(DECAY_PROBABILITY) {
            continue;
        }
        debug!("[QUANTUM] {id} failed its decay roll");
        let index = rng.random_range(0..count);
        settle(board, id, index, CollapseCause::Decayed, rng, events);
    }
}

/// Collapse one piece to the position at `index` and propagate to partners.
fn settle(
    board: &mut Board,
    id: PieceId,
    index: usize,
    cause: CollapseCause,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let (landing, partners) = match board.piece_mut(id) {
        Some(piece) if piece.is_superposed() => {
            let clamped = index.min(piece.positions.len() - 1);
            let landing = piece.positions[clamped];
            piece.positions = vec![landing];
            let partners = std::mem::take(&mut piece.entangled_with);
            (landing, partners)
        }
        _ => return,
    };
    info!("[QUANTUM] {id} collapsed to {landing} ({cause:?})");
    events.push(GameEvent::Collapsed {
        piece: id,
        at: landing,
        cause,
    });

    for partner_id in partners {
        if let Some(partner) = board.piece_mut(partner_id) {
            partner.entangled_with.retain(|other| *other != id);
        }
        let partner_index = match board.piece(partner_id) {
            Some(partner) if partner.is_superposed() => {
                if index < partner.positions.len() {
                    index
                } else {
                    rng.random_range(0..partner.positions.len())
                }
            }
            _ => continue,
        };
        settle(
            board,
            partner_id,
            partner_index,
            CollapseCause::Entangled,
            rng,
            events,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square(text: &str) -> Square {
        Square::parse(text).unwrap()
    }

    fn superposed_pair(board: &mut Board) -> (PieceId, PieceId) {
        let first = board.place_superposed(
            PieceKind::Rook,
            Color::White,
            [square("a4"), square("e4")],
        );
        let second = board.place_superposed(
            PieceKind::Bishop,
            Color::Black,
            [square("c5"), square("g5")],
        );
        (first, second)
    }

    // ==================== Split & Link ====================

    #[test]
    fn test_split_creates_superposition() {
        //! Verifies a split piece occupies exactly its two targets
        let mut board = Board::empty();
        let id = board.place(PieceKind::Knight, Color::White, square("b1"));
        split(&mut board, id, square("c3"), square("a3"));
        let piece = board.piece(id).unwrap();
        assert!(piece.is_superposed());
        assert!(piece.occupies(square("c3")));
        assert!(piece.occupies(square("a3")));
        assert!(!piece.occupies(square("b1")));
    }

    #[test]
    fn test_link_is_mutual_and_deduplicated() {
        //! Tests entanglement symmetry and idempotence
        let mut board = Board::empty();
        let (first, second) = superposed_pair(&mut board);
        link(&mut board, first, second);
        link(&mut board, first, second);
        assert_eq!(board.piece(first).unwrap().entangled_with, vec![second]);
        assert_eq!(board.piece(second).unwrap().entangled_with, vec![first]);
    }

    // ==================== Collapse ====================

    #[test]
    fn test_measure_lands_on_one_of_the_positions() {
        //! Verifies measurement picks a position the piece actually held
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::empty();
        let id = board.place_superposed(
            PieceKind::Queen,
            Color::White,
            [square("a4"), square("e4")],
        );
        let mut events = Vec::new();
        measure(&mut board, id, &mut rng, &mut events);
        let piece = board.piece(id).unwrap();
        assert!(!piece.is_superposed());
        let landing = piece.square();
        assert!(landing == square("a4") || landing == square("e4"));
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            GameEvent::Collapsed {
                cause: CollapseCause::Measured,
                ..
            }
        ));
    }

    #[test]
    fn test_correlated_partner_collapse() {
        //! Verifies an entangled partner collapses at the same index
        for seed in 0..24 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::empty();
            let (first, second) = superposed_pair(&mut board);
            let partner_positions = board.piece(second).unwrap().positions.clone();
            link(&mut board, first, second);

            let mut events = Vec::new();
            measure(&mut board, first, &mut rng, &mut events);

            let trigger = board.piece(first).unwrap();
            let partner = board.piece(second).unwrap();
            assert!(!trigger.is_superposed());
            assert!(!partner.is_superposed(), "partner must collapse too");
            assert!(trigger.entangled_with.is_empty());
            assert!(partner.entangled_with.is_empty());

            let trigger_index = if trigger.square() == square("a4") { 0 } else { 1 };
            assert_eq!(
                partner.square(),
                partner_positions[trigger_index],
                "seed {seed}: partner must land on the paired index"
            );
        }
    }

    #[test]
    fn test_chained_entanglement_collapses_transitively() {
        //! Tests that an A-B, B-C chain settles as one cluster
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::empty();
        let a = board.place_superposed(PieceKind::Rook, Color::White, [square("a1"), square("a2")]);
        let b = board.place_superposed(PieceKind::Rook, Color::White, [square("b1"), square("b2")]);
        let c = board.place_superposed(PieceKind::Rook, Color::Black, [square("c1"), square("c2")]);
        link(&mut board, a, b);
        link(&mut board, b, c);

        let mut events = Vec::new();
        measure(&mut board, a, &mut rng, &mut events);

        for id in [a, b, c] {
            let piece = board.piece(id).unwrap();
            assert!(!piece.is_superposed(), "{id} should have collapsed");
            assert!(piece.entangled_with.is_empty());
        }
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            GameEvent::Collapsed {
                cause: CollapseCause::Measured,
                ..
            }
        ));
        assert!(events.iter().skip(1).all(|event| matches!(
            event,
            GameEvent::Collapsed {
                cause: CollapseCause::Entangled,
                ..
            }
        )));
    }

    #[test]
    fn test_out_of_range_index_falls_back_to_random() {
        //! Tests the fresh random choice when no paired index exists
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::empty();
        let wide = board.place_superposed(
            PieceKind::Rook,
            Color::White,
            [square("a1"), square("a2")],
        );
        board.piece_mut(wide).unwrap().positions.push(square("a3"));
        let narrow =
            board.place_superposed(PieceKind::Rook, Color::Black, [square("h1"), square("h2")]);
        link(&mut board, wide, narrow);

        let mut events = Vec::new();
        settle(
            &mut board,
            wide,
            2,
            CollapseCause::Measured,
            &mut rng,
            &mut events,
        );

        assert_eq!(board.piece(wide).unwrap().square(), square("a3"));
        let partner = board.piece(narrow).unwrap();
        assert!(!partner.is_superposed());
        let landing = partner.square();
        assert!(landing == square("h1") || landing == square("h2"));
    }

    // ==================== Decay ====================

    #[test]
    fn test_decay_rate_close_to_one_quarter() {
        //! Statistical check of the decay probability across many seeds
        let mut collapses = 0u32;
        let trials = 400;
        for seed in 0..trials {
            let mut rng = StdRng::seed_from_u64(seed as u64);
            let mut board = Board::empty();
            let id = board.place_superposed(
                PieceKind::Knight,
                Color::White,
                [square("d4"), square("f6")],
            );
            let mut events = Vec::new();
            decay_sweep(&mut board, &mut rng, &mut events);
            if !board.piece(id).unwrap().is_superposed() {
                collapses += 1;
            }
        }
        let rate = collapses as f64 / trials as f64;
        assert!(
            (0.15..=0.35).contains(&rate),
            "decay rate {rate} strays too far from 0.25"
        );
    }

    #[test]
    fn test_decay_skips_definite_pieces() {
        //! Verifies definite pieces never roll for decay
        let mut rng = StdRng::seed_from_u64(0);
        let mut board = Board::standard();
        let mut events = Vec::new();
        decay_sweep(&mut board, &mut rng, &mut events);
        assert!(events.is_empty());
        assert_eq!(board, Board::standard());
    }
}
