//! TRIAD CLI - Command-line interface
//!
//! Commands:
//! - play: Play a game in the terminal
//! - replay: Apply a recorded list of moves
//! - simulate: Random playouts for rules statistics

mod game_args;
mod play_cmd;
mod render;
mod replay_cmd;
mod simulate_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use game_args::GameArgs;

#[derive(Parser)]
#[command(name = "triad")]
#[command(about = "TRIAD: Sword, Shield and Soldier placement game")]
struct Cli {
    #[command(flatten)]
    game: GameArgs,

    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(play_cmd::PlayArgs),
    /// Replay a JSON list of moves
    Replay(replay_cmd::ReplayArgs),
    /// Run random playouts and report statistics
    Simulate(simulate_cmd::SimulateArgs),
}

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the board output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.game.resolve()?;

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, config),
        Commands::Replay(args) => replay_cmd::run(args, config),
        Commands::Simulate(args) => simulate_cmd::run(args, config, cli.seed),
    }
}
