//! Random self-play driver
//!
//! Plays one game by sampling actions at random: classical moves from the
//! legal move generator, with quantum actions (superpose, measure, entangle,
//! and the one-time powers) mixed in at a configurable rate. Pending
//! promotions always take a queen. When the game ends or the action budget
//! runs out, the archived summary is printed as JSON.
//!
//! ```text
//! RUST_LOG=info cargo run --bin selfplay -- --seed 7 --max-actions 120
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use qchess::constants::BOARD_SIZE;
use qchess::{Action, Game, PieceKind, SpecialPower, Square};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "selfplay",
    about = "Play one random quantum chess game and print its summary"
)]
struct Args {
    /// Seed for deterministic playouts; omit for a fresh random game
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many applied actions even if the game is unfinished
    #[arg(long, default_value_t = 300)]
    max_actions: u32,

    /// Probability of attempting a quantum action instead of a classical move
    #[arg(long, default_value_t = 0.25)]
    quantum_rate: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let quantum_rate = args.quantum_rate.clamp(0.0, 1.0);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut game = Game::new();
    let mut applied = 0u32;
    let mut rejected_streak = 0u32;
    while applied < args.max_actions && !game.is_over() {
        let classical = classical_moves(&game);
        let action = if rng.random_bool(quantum_rate) {
            quantum_action(&game, &mut rng).or_else(|| pick(&classical, &mut rng))
        } else {
            pick(&classical, &mut rng)
        };
        let Some(action) = action else {
            break;
        };
        match game.apply_with_rng(action, &mut rng) {
            Ok(outcome) => {
                game = outcome.game;
                applied += 1;
                rejected_streak = 0;
            }
            Err(err) => {
                // Candidate sampling does not recheck every rule (overlapping
                // ghost squares and the like); draw again.
                warn!("[SELFPLAY] rejected {action:?}: {err}");
                rejected_streak += 1;
                if rejected_streak > 20 {
                    break;
                }
                continue;
            }
        }
        if game.pending_promotion().is_some() {
            let outcome = game
                .apply_with_rng(
                    Action::Promote {
                        kind: PieceKind::Queen,
                    },
                    &mut rng,
                )
                .context("resolving pending promotion")?;
            game = outcome.game;
            applied += 1;
        }
    }

    info!(
        "[SELFPLAY] {} after {applied} actions",
        game.verdict().message()
    );
    let summary = game.summary();
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("serializing game summary")?
    );
    Ok(())
}

/// Every legal classical move for the side to move.
fn classical_moves(game: &Game) -> Vec<Action> {
    let mut moves = Vec::new();
    for piece in game.board().pieces() {
        if piece.color != game.turn() || piece.is_superposed() {
            continue;
        }
        let from = piece.square();
        for to in game.legal_destinations(from) {
            moves.push(Action::Move { from, to });
        }
    }
    moves
}

/// One randomly chosen quantum action that currently looks playable.
fn quantum_action(game: &Game, rng: &mut impl Rng) -> Option<Action> {
    let turn = game.turn();
    let empties = empty_squares(game);

    let mut own_definite = Vec::new();
    let mut splittable = Vec::new();
    let mut own_superposed = Vec::new();
    let mut all_superposed = Vec::new();
    for piece in game.board().pieces() {
        if piece.is_superposed() {
            all_superposed.push(piece.square());
            if piece.color == turn {
                own_superposed.push(piece.square());
            }
            continue;
        }
        if piece.color == turn {
            own_definite.push(piece.square());
            if piece.kind != PieceKind::King {
                splittable.push(piece.square());
            }
        }
    }

    let mut candidates = Vec::new();
    if let (Some(from), Some((first, second))) =
        (pick(&splittable, rng), two_distinct(&empties, rng))
    {
        candidates.push(Action::Superpose {
            from,
            first,
            second,
        });
    }
    if let Some(at) = pick(&own_superposed, rng) {
        candidates.push(Action::Measure { at });
    }
    if let Some((first, second)) = two_distinct(&all_superposed, rng) {
        candidates.push(Action::Entangle { first, second });
    }
    if game.power_available(turn, SpecialPower::Teleport) {
        if let (Some(from), Some(to)) = (pick(&own_definite, rng), pick(&empties, rng)) {
            candidates.push(Action::Teleport { from, to });
        }
    }
    if game.power_available(turn, SpecialPower::Swap) {
        if let Some((first, second)) = two_distinct(&own_definite, rng) {
            candidates.push(Action::Swap { first, second });
        }
    }
    if game.power_available(turn, SpecialPower::Clone) {
        let kinds = [
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
        ];
        if let (Some(kind), Some(at)) = (pick(&kinds, rng), pick(&empties, rng)) {
            candidates.push(Action::Clone { kind, at });
        }
    }
    pick(&candidates, rng)
}

fn empty_squares(game: &Game) -> Vec<Square> {
    let mut empties = Vec::new();
    for file in 0..BOARD_SIZE {
        for rank in 0..BOARD_SIZE {
            let square = Square::at(file, rank);
            if game.board().is_empty_square(square) {
                empties.push(square);
            }
        }
    }
    empties
}

fn pick<T: Copy>(items: &[T], rng: &mut impl Rng) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[rng.random_range(0..items.len())])
    }
}

/// Two entries at different indexes; the values themselves may collide when
/// the input holds duplicates.
fn two_distinct<T: Copy>(items: &[T], rng: &mut impl Rng) -> Option<(T, T)> {
    if items.len() < 2 {
        return None;
    }
    let first = rng.random_range(0..items.len());
    let mut second = rng.random_range(0..items.len() - 1);
    if second >= first {
        second += 1;
    }
    Some((items[first], items[second]))
}
