//! Quantum mechanics integration tests
//!
//! Exercises the non-classical layer through the public API:
//! - Superposition creation and its rejection cases
//! - Measurement collapse, uniformity, and event ordering
//! - Entanglement linking and correlated collapse propagation
//! - Passive decay across turn transitions
//! - The one-time teleport, swap and clone powers
//! - Whole-piece capture of superposed pieces

use qchess::{
    Action, ActionError, ActionKind, Board, CollapseCause, Color, Game, GameEvent, PieceId,
    PieceKind, SpecialPower, Square,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn square(text: &str) -> Square {
    Square::parse(text).unwrap()
}

/// Two kings plus one white rook superposed across a4 and b4.
fn superposed_rook_board() -> (Board, PieceId) {
    let mut board = Board::empty();
    board.place(PieceKind::King, Color::White, square("e1"));
    board.place(PieceKind::King, Color::Black, square("e8"));
    let rook = board.place_superposed(
        PieceKind::Rook,
        Color::White,
        [square("a4"), square("b4")],
    );
    (board, rook)
}

// ============================================================================
// Superposition
// ============================================================================

#[test]
fn test_superpose_vacates_origin_and_fills_targets() {
    let game = Game::new();
    let outcome = game
        .apply_with_rng(
            Action::Superpose {
                from: square("b1"),
                first: square("c3"),
                second: square("h4"),
            },
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();

    let after = &outcome.game;
    assert!(after.board().is_empty_square(square("b1")));
    assert!(outcome
        .events
        .iter()
        .any(|event| matches!(event, GameEvent::Superposed { .. })));

    // The same turn's decay sweep may already have collapsed the split, so
    // the knight is either superposed across both targets or definite on one.
    let knight = after
        .board()
        .pieces()
        .iter()
        .find(|piece| {
            piece.kind == PieceKind::Knight
                && (piece.occupies(square("c3")) || piece.occupies(square("h4")))
        })
        .expect("the knight occupies at least one target");
    for position in &knight.positions {
        assert!(*position == square("c3") || *position == square("h4"));
    }
    assert_eq!(after.turn(), Color::Black, "splitting consumes the turn");
    assert_eq!(
        after.history().last_move().unwrap().kind,
        ActionKind::Superposition
    );
}

#[test]
fn test_superpose_rejects_occupied_and_degenerate_targets() {
    let game = Game::new();
    let before = game.clone();

    let occupied = game.apply(Action::Superpose {
        from: square("b1"),
        first: square("d2"),
        second: square("e4"),
    });
    assert!(matches!(
        occupied,
        Err(ActionError::IllegalDestination { .. })
    ));

    let duplicate = game.apply(Action::Superpose {
        from: square("b1"),
        first: square("c3"),
        second: square("c3"),
    });
    assert!(matches!(
        duplicate,
        Err(ActionError::IllegalDestination { .. })
    ));

    let onto_self = game.apply(Action::Superpose {
        from: square("b1"),
        first: square("b1"),
        second: square("c3"),
    });
    assert!(matches!(
        onto_self,
        Err(ActionError::IllegalDestination { .. })
    ));

    assert_eq!(game, before, "rejected splits leave the game untouched");
}

#[test]
fn test_kings_never_enter_superposition() {
    let game = Game::new();
    let result = game.apply(Action::Superpose {
        from: square("e1"),
        first: square("e3"),
        second: square("e4"),
    });
    assert!(matches!(result, Err(ActionError::InvalidSelection { .. })));
}

#[test]
fn test_superposed_piece_cannot_move_classically() {
    let (board, _) = superposed_rook_board();
    let game = Game::with_board(board, Color::White);

    assert!(game.legal_destinations(square("a4")).is_empty());
    let result = game.apply(Action::Move {
        from: square("a4"),
        to: square("a8"),
    });
    assert!(
        matches!(result, Err(ActionError::InvalidSelection { .. })),
        "a superposed piece must be measured before it can move"
    );
}

// ============================================================================
// Measurement
// ============================================================================

#[test]
fn test_measurement_collapses_to_one_position() {
    let (board, rook) = superposed_rook_board();
    let game = Game::with_board(board, Color::White);

    let outcome = game
        .apply_with_rng(
            Action::Measure { at: square("a4") },
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap();

    let after = &outcome.game;
    let collapsed = after.board().piece(rook).unwrap();
    assert!(!collapsed.is_superposed());
    let landing = collapsed.square();
    assert!(landing == square("a4") || landing == square("b4"));

    let collapse_index = outcome
        .events
        .iter()
        .position(|event| {
            matches!(
                event,
                GameEvent::Collapsed {
                    cause: CollapseCause::Measured,
                    ..
                }
            )
        })
        .expect("measurement emits a collapse");
    let turn_index = outcome
        .events
        .iter()
        .position(|event| matches!(event, GameEvent::TurnPassed { .. }))
        .expect("measurement consumes the turn");
    assert!(collapse_index < turn_index, "collapse precedes turn passage");

    let record = after.history().last_move().unwrap();
    assert_eq!(record.kind, ActionKind::Measurement);
    assert_eq!(record.to, Some(landing));
}

#[test]
fn test_measurement_rejects_definite_enemy_and_empty_squares() {
    let mut board = Board::empty();
    board.place(PieceKind::King, Color::White, square("e1"));
    board.place(PieceKind::King, Color::Black, square("e8"));
    board.place(PieceKind::Knight, Color::White, square("g5"));
    board.place_superposed(
        PieceKind::Rook,
        Color::Black,
        [square("a6"), square("b6")],
    );
    let game = Game::with_board(board, Color::White);

    let definite = game.apply(Action::Measure { at: square("g5") });
    assert!(matches!(definite, Err(ActionError::InvalidSelection { .. })));

    let enemy = game.apply(Action::Measure { at: square("a6") });
    assert!(
        matches!(enemy, Err(ActionError::InvalidSelection { .. })),
        "only the owner may measure a superposed piece"
    );

    let empty = game.apply(Action::Measure { at: square("d4") });
    assert!(matches!(empty, Err(ActionError::InvalidSelection { .. })));
}

#[test]
fn test_measurement_is_uniform_over_positions() {
    // The same position measured across many seeded games converges to an
    // even split between the two branches.
    let mut first_branch = 0u32;
    let trials = 4000u64;
    for seed in 0..trials {
        let (board, rook) = superposed_rook_board();
        let game = Game::with_board(board, Color::White);
        let outcome = game
            .apply_with_rng(
                Action::Measure { at: square("a4") },
                &mut StdRng::seed_from_u64(seed),
            )
            .unwrap();
        if outcome.game.board().piece(rook).unwrap().square() == square("a4") {
            first_branch += 1;
        }
    }
    let share = first_branch as f64 / trials as f64;
    assert!(
        (0.45..=0.55).contains(&share),
        "expected roughly even collapse, got {share}"
    );
}

// ============================================================================
// Entanglement
// ============================================================================

/// Kings plus a white rook on [a4, b4] and a black rook on [a6, b6].
fn entangled_pair_board() -> Board {
    let mut board = Board::empty();
    board.place(PieceKind::King, Color::White, square("e1"));
    board.place(PieceKind::King, Color::Black, square("e8"));
    board.place_superposed(
        PieceKind::Rook,
        Color::White,
        [square("a4"), square("b4")],
    );
    board.place_superposed(
        PieceKind::Rook,
        Color::Black,
        [square("a6"), square("b6")],
    );
    board
}

#[test]
fn test_entangle_rejects_definite_pieces_and_self_links() {
    let game = Game::new();
    let definite = game.apply(Action::Entangle {
        first: square("b1"),
        second: square("g1"),
    });
    assert!(matches!(
        definite,
        Err(ActionError::InvalidEntanglementTarget { .. })
    ));

    let (board, _) = superposed_rook_board();
    let game = Game::with_board(board, Color::White);
    let self_link = game.apply(Action::Entangle {
        first: square("a4"),
        second: square("b4"),
    });
    assert!(
        matches!(
            self_link,
            Err(ActionError::InvalidEntanglementTarget { .. })
        ),
        "both squares resolve to the same piece"
    );
}

#[test]
fn test_entangled_pieces_share_one_fate() {
    // Whatever the decay sweep does after the link, the pair must stay in
    // lockstep: both still superposed and mutually linked, or both collapsed
    // with the links cleared on each side.
    let mut intact_runs = 0u32;
    let mut collapsed_runs = 0u32;
    for seed in 0..100 {
        let game = Game::with_board(entangled_pair_board(), Color::White);
        let outcome = game
            .apply_with_rng(
                Action::Entangle {
                    first: square("a4"),
                    second: square("a6"),
                },
                &mut StdRng::seed_from_u64(seed),
            )
            .unwrap();
        assert!(outcome
            .events
            .iter()
            .any(|event| matches!(event, GameEvent::Entangled { .. })));

        let board = outcome.game.board();
        let white = board
            .pieces()
            .iter()
            .find(|piece| piece.kind == PieceKind::Rook && piece.color == Color::White)
            .unwrap();
        let black = board
            .pieces()
            .iter()
            .find(|piece| piece.kind == PieceKind::Rook && piece.color == Color::Black)
            .unwrap();
        if white.is_superposed() {
            intact_runs += 1;
            assert!(black.is_superposed());
            assert_eq!(white.entangled_with, vec![black.id]);
            assert_eq!(black.entangled_with, vec![white.id]);
        } else {
            collapsed_runs += 1;
            assert!(
                !black.is_superposed(),
                "a collapsing piece drags its partner down"
            );
            assert!(white.entangled_with.is_empty());
            assert!(black.entangled_with.is_empty());
            // Every decay collapse is accompanied by the dragged partner.
            assert!(outcome.events.iter().any(|event| matches!(
                event,
                GameEvent::Collapsed {
                    cause: CollapseCause::Entangled,
                    ..
                }
            )));
        }
    }
    assert!(intact_runs > 0, "some sweeps leave the pair superposed");
    assert!(collapsed_runs > 0, "some sweeps collapse the pair");
}

#[test]
fn test_measuring_one_partner_collapses_both_by_position_index() {
    let mut exercised = false;
    for seed in 0..100 {
        let game = Game::with_board(entangled_pair_board(), Color::White);
        let outcome = game
            .apply_with_rng(
                Action::Entangle {
                    first: square("a4"),
                    second: square("a6"),
                },
                &mut StdRng::seed_from_u64(seed),
            )
            .unwrap();
        let linked = outcome.game;
        let still_superposed = linked
            .board()
            .pieces()
            .iter()
            .filter(|piece| piece.is_superposed())
            .count()
            == 2;
        if !still_superposed {
            continue;
        }

        // Black measures its own rook; the white partner must land on the
        // position with the same index.
        let measured = linked
            .apply_with_rng(
                Action::Measure { at: square("a6") },
                &mut StdRng::seed_from_u64(seed * 31 + 7),
            )
            .unwrap();
        let board = measured.game.board();
        let white = board
            .pieces()
            .iter()
            .find(|piece| piece.kind == PieceKind::Rook && piece.color == Color::White)
            .unwrap();
        let black = board
            .pieces()
            .iter()
            .find(|piece| piece.kind == PieceKind::Rook && piece.color == Color::Black)
            .unwrap();
        assert!(!white.is_superposed() && !black.is_superposed());
        if black.square() == square("a6") {
            assert_eq!(white.square(), square("a4"));
        } else {
            assert_eq!(black.square(), square("b6"));
            assert_eq!(white.square(), square("b4"));
        }
        assert!(white.entangled_with.is_empty());
        assert!(black.entangled_with.is_empty());
        exercised = true;
        break;
    }
    assert!(exercised, "at least one sweep leaves the pair measurable");
}

// ============================================================================
// Decay
// ============================================================================

#[test]
fn test_decay_eventually_collapses_a_superposition() {
    let mut board = Board::standard();
    let rook = board.place_superposed(
        PieceKind::Rook,
        Color::White,
        [square("a4"), square("h4")],
    );
    let mut game = Game::with_board(board, Color::White);
    let mut rng = StdRng::seed_from_u64(11);
    let shuffle = [("b1", "c3"), ("b8", "c6"), ("c3", "b1"), ("c6", "b8")];

    let mut landing = None;
    for ply in 0..120 {
        let (from, to) = shuffle[ply % shuffle.len()];
        let outcome = game
            .apply_with_rng(
                Action::Move {
                    from: square(from),
                    to: square(to),
                },
                &mut rng,
            )
            .unwrap();
        for event in &outcome.events {
            if let GameEvent::Collapsed {
                piece,
                at,
                cause: CollapseCause::Decayed,
            } = event
            {
                if *piece == rook {
                    landing = Some(*at);
                }
            }
        }
        game = outcome.game;
        if landing.is_some() {
            break;
        }
    }

    let at = landing.expect("a 25% per-turn roll fires well within 120 turns");
    assert!(at == square("a4") || at == square("h4"));
    assert!(!game.board().piece(rook).unwrap().is_superposed());
}

// ============================================================================
// One-Time Powers
// ============================================================================

#[test]
fn test_teleport_is_once_per_color() {
    let game = Game::new();
    assert!(game.power_available(Color::White, SpecialPower::Teleport));

    let game = game
        .apply_with_rng(
            Action::Teleport {
                from: square("a1"),
                to: square("a4"),
            },
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap()
        .game;
    let rook = game.board().piece_at(square("a4")).unwrap();
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(rook.has_moved, "teleporting forfeits castling eligibility");
    assert!(!game.power_available(Color::White, SpecialPower::Teleport));
    assert!(
        game.power_available(Color::Black, SpecialPower::Teleport),
        "the ledgers are tracked per color"
    );

    let game = game
        .apply_with_rng(
            Action::Teleport {
                from: square("a8"),
                to: square("a5"),
            },
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap()
        .game;

    let again = game.apply(Action::Teleport {
        from: square("h1"),
        to: square("h4"),
    });
    assert_eq!(
        again,
        Err(ActionError::ActionAlreadyUsed {
            power: SpecialPower::Teleport,
            color: Color::White,
        })
    );
}

#[test]
fn test_teleport_requires_an_empty_destination() {
    let game = Game::new();
    let result = game.apply(Action::Teleport {
        from: square("a1"),
        to: square("e7"),
    });
    assert!(matches!(
        result,
        Err(ActionError::IllegalDestination { .. })
    ));
}

#[test]
fn test_swap_exchanges_two_own_pieces() {
    let game = Game::new();
    let outcome = game
        .apply_with_rng(
            Action::Swap {
                first: square("a1"),
                second: square("b1"),
            },
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();

    let after = &outcome.game;
    assert_eq!(after.board().piece_at(square("a1")).unwrap().kind, PieceKind::Knight);
    assert_eq!(after.board().piece_at(square("b1")).unwrap().kind, PieceKind::Rook);
    assert!(after.board().piece_at(square("b1")).unwrap().has_moved);
    assert!(outcome
        .events
        .iter()
        .any(|event| matches!(event, GameEvent::Swapped { .. })));
    assert_eq!(after.history().last_move().unwrap().kind, ActionKind::Swap);
    assert!(!after.power_available(Color::White, SpecialPower::Swap));
    assert!(
        after.power_available(Color::White, SpecialPower::Teleport),
        "each power is spent independently"
    );
}

#[test]
fn test_clone_mints_a_new_piece() {
    let game = Game::new();
    let outcome = game
        .apply_with_rng(
            Action::Clone {
                kind: PieceKind::Queen,
                at: square("e4"),
            },
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();

    let after = &outcome.game;
    assert_eq!(after.board().pieces().len(), 33);
    let minted = after.board().piece_at(square("e4")).unwrap();
    assert_eq!(minted.kind, PieceKind::Queen);
    assert_eq!(minted.color, Color::White);
    assert!(minted.has_moved);
    assert!(!after.power_available(Color::White, SpecialPower::Clone));
}

#[test]
fn test_clone_rejects_kings_and_occupied_squares() {
    let game = Game::new();
    let king = game.apply(Action::Clone {
        kind: PieceKind::King,
        at: square("e4"),
    });
    assert!(matches!(king, Err(ActionError::InvalidSelection { .. })));

    let occupied = game.apply(Action::Clone {
        kind: PieceKind::Queen,
        at: square("e2"),
    });
    assert!(matches!(
        occupied,
        Err(ActionError::InvalidSelection { .. })
    ));
    assert!(
        game.power_available(Color::White, SpecialPower::Clone),
        "a rejected attempt does not spend the power"
    );
}

// ============================================================================
// Capturing Superposed Pieces
// ============================================================================

#[test]
fn test_capturing_any_ghost_square_removes_the_whole_piece() {
    let mut board = Board::empty();
    board.place(PieceKind::King, Color::White, square("e1"));
    board.place(PieceKind::King, Color::Black, square("e8"));
    board.place(PieceKind::Queen, Color::White, square("d1"));
    board.place_superposed(
        PieceKind::Rook,
        Color::Black,
        [square("d5"), square("h5")],
    );
    let game = Game::with_board(board, Color::White);

    let outcome = game
        .apply_with_rng(
            Action::Move {
                from: square("d1"),
                to: square("d5"),
            },
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();

    let after = &outcome.game;
    assert_eq!(after.board().pieces().len(), 3);
    assert!(
        after.board().is_empty_square(square("h5")),
        "no partial piece survives on the other branch"
    );
    assert!(outcome
        .events
        .iter()
        .any(|event| matches!(event, GameEvent::Captured { kind: PieceKind::Rook, .. })));
}
