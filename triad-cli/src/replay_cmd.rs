//! Replay command - apply a recorded list of moves
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_moves(), replay_moves(), report()
//! - Level 3: (engine calls)
//! - Level 4: output formatting

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use triad_core::{GameConfig, PieceType, Rejection, RulesEngine, Snapshot};

use crate::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON file with an array of {"piece", "x", "y"} moves
    #[arg(long, value_name = "FILE")]
    pub moves: PathBuf,

    /// Stop at the first rejected move
    #[arg(long)]
    pub strict: bool,

    /// Output the final state as JSON
    #[arg(long)]
    pub json: bool,
}

/// One recorded move. The mover is implied by turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub piece: PieceType,
    pub x: i32,
    pub y: i32,
}

/// A move the engine refused
#[derive(Clone, Debug, Serialize)]
struct RejectedMove {
    index: usize,
    entry: MoveEntry,
    reason: String,
}

#[derive(Debug)]
struct ReplayReport {
    game: RulesEngine,
    accepted: usize,
    rejected: Vec<RejectedMove>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run replay command
pub fn run(args: ReplayArgs, config: GameConfig) -> Result<()> {
    let moves = load_moves(&args.moves)?;

    tracing::info!("Replaying {} moves from {}", moves.len(), args.moves.display());

    let report = replay_moves(config, &moves, args.strict)?;

    print_report(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_moves(path: &Path) -> Result<Vec<MoveEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read moves file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse moves file: {}", path.display()))
}

fn replay_moves(config: GameConfig, moves: &[MoveEntry], strict: bool) -> Result<ReplayReport> {
    let mut game = RulesEngine::new(config)?;
    let mut accepted = 0;
    let mut rejected = Vec::new();

    for (index, &entry) in moves.iter().enumerate() {
        match game.place(entry.x, entry.y, entry.piece) {
            Ok(_) => accepted += 1,
            Err(rejection) => {
                if strict {
                    bail!(strict_error(index, entry, rejection));
                }
                tracing::warn!("Move {} rejected: {}", index + 1, rejection);
                rejected.push(RejectedMove {
                    index,
                    entry,
                    reason: rejection.to_string(),
                });
            }
        }
    }

    Ok(ReplayReport {
        game,
        accepted,
        rejected,
    })
}

fn print_report(report: &ReplayReport, json: bool) -> Result<()> {
    if json {
        println!("{}", format_json(report)?);
    } else {
        print!("{}", format_text(report));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn strict_error(index: usize, entry: MoveEntry, rejection: Rejection) -> String {
    format!(
        "move {} ({} at ({}, {})) rejected: {}",
        index + 1,
        entry.piece,
        entry.x,
        entry.y,
        rejection
    )
}

fn format_json(report: &ReplayReport) -> Result<String> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        accepted: usize,
        rejected: &'a [RejectedMove],
        state: Snapshot,
    }

    let output = JsonOutput {
        accepted: report.accepted,
        rejected: &report.rejected,
        state: report.game.snapshot(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn format_text(report: &ReplayReport) -> String {
    let mut out = String::new();
    out.push_str(&render::render(&report.game));
    out.push_str(&format!(
        "\nAccepted {} moves, rejected {}\n",
        report.accepted,
        report.rejected.len()
    ));
    for r in &report.rejected {
        out.push_str(&format!(
            "  #{}: {} at ({}, {}) - {}\n",
            r.index + 1,
            r.entry.piece,
            r.entry.x,
            r.entry.y,
            r.reason
        ));
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
