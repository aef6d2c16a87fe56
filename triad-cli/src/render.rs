//! Text rendering of the board and status panel
//!
//! Each cell shows its stack in placement order: `S` Sword, `H` Shield,
//! `O` Soldier; uppercase for White, lowercase for Black. Row y = 0 is
//! printed at the bottom.

use triad_core::{GameOutcome, GameStatus, Piece, PieceType, Player, RulesEngine};

/// Six letters fit the fullest possible stack
const CELL_WIDTH: usize = 6;

pub fn piece_code(piece: Piece) -> char {
    let letter = piece.piece_type.letter();
    match piece.owner {
        Player::White => letter,
        Player::Black => letter.to_ascii_lowercase(),
    }
}

fn cell_text(stack: &[Piece]) -> String {
    if stack.is_empty() {
        ".".to_string()
    } else {
        stack.iter().map(|&p| piece_code(p)).collect()
    }
}

/// Board grid with coordinates on both axes
pub fn render_board(game: &RulesEngine) -> String {
    let n = game.board_size() as i32;
    let mut out = String::new();

    for y in (0..n).rev() {
        out.push_str(&format!("{:>3} |", y));
        for x in 0..n {
            let stack = game.pieces_at(x, y).unwrap_or_default();
            out.push_str(&format!(" {:^width$}", cell_text(stack), width = CELL_WIDTH));
        }
        out.push('\n');
    }

    out.push_str("    +");
    out.push_str(&"-".repeat((CELL_WIDTH + 1) * n as usize));
    out.push('\n');
    out.push_str("     ");
    for x in 0..n {
        out.push_str(&format!(" {:^width$}", x, width = CELL_WIDTH));
    }
    out.push('\n');
    out
}

pub fn outcome_text(status: GameStatus) -> String {
    match status {
        GameStatus::InProgress => "in progress".to_string(),
        GameStatus::Ended(GameOutcome::Win(player)) => format!("{} wins", player),
        GameStatus::Ended(GameOutcome::Draw) => "draw".to_string(),
    }
}

/// Scores, supply, turn and last move
pub fn render_status(game: &RulesEngine) -> String {
    let mut out = String::new();
    for player in Player::ALL {
        let supply: Vec<String> = PieceType::ALL
            .iter()
            .map(|&pt| format!("{} {}", pt, game.remaining(player, pt)))
            .collect();
        out.push_str(&format!(
            "{:<6} score {:>3} | left: {}\n",
            player,
            game.score(player),
            supply.join(", ")
        ));
    }

    if let Some(last) = game.last_placed() {
        out.push_str(&format!("Last: {} at {}\n", last.piece_type, last.pos));
    }

    let line = match game.status() {
        GameStatus::InProgress => format!("To move: {}\n", game.current_player()),
        status => format!("Game over: {}\n", outcome_text(status)),
    };
    out.push_str(&line);
    out
}

pub fn render(game: &RulesEngine) -> String {
    format!("{}\n{}", render_board(game), render_status(game))
}
