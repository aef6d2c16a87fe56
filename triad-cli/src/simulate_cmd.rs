//! Simulate command - random playouts for rules statistics
//!
//! Every move is drawn uniformly from the current player's legal
//! placements. Used to see how often each scoring rule fires and how
//! games end under a given config.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: simulate_games(), report_results()
//! - Level 3: play_random_game(), compute_statistics()
//! - Level 4: RNG and formatting utilities

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use triad_core::{GameConfig, GameOutcome, GameStatus, PieceType, Player, Pos, RulesEngine, ScoreRule};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// How a single playout finished
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayoutEnd {
    Finished(GameOutcome),
    /// The player to move had pieces left but no legal cell for any of them
    Stalled,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    end: PlayoutEnd,
    white_score: u32,
    black_score: u32,
    moves: usize,
    triads: usize,
    mixed: usize,
}

/// Aggregated results
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
struct SimulationStats {
    total_games: usize,
    white_wins: usize,
    black_wins: usize,
    draws: usize,
    stalled: usize,
    avg_white_score: f32,
    avg_black_score: f32,
    avg_moves: f32,
    triads_per_game: f32,
    mixed_per_game: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
pub fn run(args: SimulateArgs, config: GameConfig, seed: Option<u64>) -> Result<()> {
    let base_seed = seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Simulating {} games on {}x{} (pieces={}, seed={})",
        args.games,
        config.board_size,
        config.board_size,
        config.pieces_per_type,
        base_seed
    );

    let records = simulate_games(config, args.games, base_seed)?;
    let stats = compute_statistics(&records);

    report_results(&stats, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in parallel. Game `i` uses seed `base_seed + i`, so
/// results do not depend on thread scheduling.
fn simulate_games(config: GameConfig, games: usize, base_seed: u64) -> Result<Vec<GameRecord>> {
    let fresh = RulesEngine::new(config)?;
    let records = (0..games)
        .into_par_iter()
        .map(|i| {
            let mut rng = create_rng(base_seed.wrapping_add(i as u64));
            play_random_game(fresh.clone(), &mut rng)
        })
        .collect();
    Ok(records)
}

fn report_results(stats: &SimulationStats, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        print_text_results(stats);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_random_game(mut game: RulesEngine, rng: &mut ChaCha8Rng) -> GameRecord {
    let end = loop {
        if let GameStatus::Ended(outcome) = game.status() {
            break PlayoutEnd::Finished(outcome);
        }

        let options = legal_options(&game);
        if options.is_empty() {
            tracing::debug!("Playout stalled after {} moves", game.history().len());
            break PlayoutEnd::Stalled;
        }

        let (pos, piece_type) = options[rng.gen_range(0..options.len())];
        game.try_place(pos.x, pos.y, piece_type);
    };

    let count_rule = |rule: ScoreRule| {
        game.history()
            .iter()
            .filter(|r| r.award.map(|a| a.rule) == Some(rule))
            .count()
    };

    GameRecord {
        end,
        white_score: game.score(Player::White),
        black_score: game.score(Player::Black),
        moves: game.history().len(),
        triads: count_rule(ScoreRule::Triad),
        mixed: count_rule(ScoreRule::Mixed),
    }
}

/// Every (cell, piece type) the current player may play
fn legal_options(game: &RulesEngine) -> Vec<(Pos, PieceType)> {
    PieceType::ALL
        .iter()
        .flat_map(|&pt| game.legal_placements(pt).into_iter().map(move |pos| (pos, pt)))
        .collect()
}

fn compute_statistics(records: &[GameRecord]) -> SimulationStats {
    let count = |end: PlayoutEnd| records.iter().filter(|r| r.end == end).count();
    let average = |f: fn(&GameRecord) -> usize| {
        if records.is_empty() {
            0.0
        } else {
            records.iter().map(f).sum::<usize>() as f32 / records.len() as f32
        }
    };

    SimulationStats {
        total_games: records.len(),
        white_wins: count(PlayoutEnd::Finished(GameOutcome::Win(Player::White))),
        black_wins: count(PlayoutEnd::Finished(GameOutcome::Win(Player::Black))),
        draws: count(PlayoutEnd::Finished(GameOutcome::Draw)),
        stalled: count(PlayoutEnd::Stalled),
        avg_white_score: average(|r| r.white_score as usize),
        avg_black_score: average(|r| r.black_score as usize),
        avg_moves: average(|r| r.moves),
        triads_per_game: average(|r| r.triads),
        mixed_per_game: average(|r| r.mixed),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_text_results(stats: &SimulationStats) {
    let total = stats.total_games;

    println!("\n=== Simulation Results ===");
    println!("Total games: {}", total);
    println!("White wins:  {} ({:.1}%)", stats.white_wins, percent(stats.white_wins, total));
    println!("Black wins:  {} ({:.1}%)", stats.black_wins, percent(stats.black_wins, total));
    println!("Draws:       {} ({:.1}%)", stats.draws, percent(stats.draws, total));
    println!("Stalled:     {} ({:.1}%)", stats.stalled, percent(stats.stalled, total));
    println!("Avg score:   White {:.2}, Black {:.2}", stats.avg_white_score, stats.avg_black_score);
    println!("Avg moves:   {:.1}", stats.avg_moves);
    println!("Triads/game: {:.2}", stats.triads_per_game);
    println!("Mixed/game:  {:.2}", stats.mixed_per_game);
}

// ============================================================================
// TESTS
// ============================================================================
