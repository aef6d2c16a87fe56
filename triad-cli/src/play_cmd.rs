//! Play command - interactive game on stdin/stdout
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_session() - read/execute loop
//! - Level 3: execute(), report_if_stalled()
//! - Level 4: parse_command(), help text

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::Args;

use triad_core::{GameConfig, PieceType, Player, RulesEngine, ScoreRule};

use crate::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Do not redraw the board after each move
    #[arg(long)]
    pub quiet: bool,
}

/// One line of player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Place { piece_type: PieceType, x: i32, y: i32 },
    Board,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  <piece> <x> <y>   place a piece, e.g. `sword 2 2` or `h 2 4`
                    pieces: sword (s), shield (h), soldier (o)
  board             show the board
  help              show this help
  quit              leave the game
";

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, config: GameConfig) -> Result<()> {
    let mut game = RulesEngine::new(config)?;

    tracing::info!(
        "Starting game on a {}x{} board, {} pieces per type",
        config.board_size,
        config.board_size,
        config.pieces_per_type
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    play_session(&mut game, stdin.lock(), stdout.lock(), !args.quiet)
}

// ============================================================================
// LEVEL 2 - SESSION LOOP
// ============================================================================

/// Read commands until the game ends, input runs out or the player quits
fn play_session<R: BufRead, W: Write>(
    game: &mut RulesEngine,
    input: R,
    mut out: W,
    redraw: bool,
) -> Result<()> {
    write!(out, "{}", render::render(game))?;
    writeln!(out, "Type `help` for commands.")?;

    if report_if_stalled(game, &mut out)? {
        out.flush()?;
        return Ok(());
    }

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        };

        if command == Command::Quit {
            writeln!(out, "Bye.")?;
            break;
        }

        execute(game, command, &mut out, redraw)?;

        if game.status().is_over() {
            writeln!(out, "Final: {}", render::outcome_text(game.status()))?;
            break;
        }
        if report_if_stalled(game, &mut out)? {
            break;
        }
    }

    out.flush()?;
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn execute<W: Write>(game: &mut RulesEngine, command: Command, out: &mut W, redraw: bool) -> Result<()> {
    match command {
        Command::Place { piece_type, x, y } => {
            let player = game.current_player();
            match game.place(x, y, piece_type) {
                Ok(outcome) => {
                    writeln!(out, "{} placed {} at {}", player, piece_type, outcome.pos)?;
                    if let Some(award) = outcome.award {
                        let rule = match award.rule {
                            ScoreRule::Triad => "triad",
                            ScoreRule::Mixed => "mixed",
                        };
                        writeln!(out, "{} scores {} ({})", award.player, award.points, rule)?;
                    }
                    if redraw {
                        write!(out, "{}", render::render(game))?;
                    }
                }
                Err(rejection) => writeln!(out, "Rejected: {}", rejection)?,
            }
        }
        Command::Board => write!(out, "{}", render::render(game))?,
        Command::Help => write!(out, "{}", HELP)?,
        Command::Quit => {}
    }
    Ok(())
}

/// A game in progress where the player to move has no legal cell for any
/// remaining piece can never end. Report it so the session stops.
fn report_if_stalled<W: Write>(game: &RulesEngine, out: &mut W) -> Result<bool> {
    if game.status().is_over() || game.has_legal_placement() {
        return Ok(false);
    }
    tracing::info!("Game stalled after {} moves", game.history().len());
    writeln!(
        out,
        "Stalled: {} has pieces left but no legal placement",
        game.current_player()
    )?;
    writeln!(
        out,
        "Final score: White {}, Black {}",
        game.score(Player::White),
        game.score(Player::Black)
    )?;
    Ok(true)
}

// ============================================================================
// LEVEL 4 - PARSING
// ============================================================================

fn parse_command(line: &str) -> Result<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["board"] => Ok(Command::Board),
        ["help"] | ["?"] => Ok(Command::Help),
        ["quit"] | ["exit"] | ["q"] => Ok(Command::Quit),
        [piece, x, y] => {
            let piece_type: PieceType = piece.parse()?;
            let x: i32 = x.parse().map_err(|_| anyhow::anyhow!("bad x coordinate '{}'", x))?;
            let y: i32 = y.parse().map_err(|_| anyhow::anyhow!("bad y coordinate '{}'", y))?;
            Ok(Command::Place { piece_type, x, y })
        }
        _ => bail!("unrecognized command '{}' (try `help`)", line.trim()),
    }
}

// ============================================================================
// TESTS
// ============================================================================
