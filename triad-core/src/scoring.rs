//! Cell scoring
//!
//! Run on the target cell after every accepted placement:
//! - Triad: one player holds all three types at the cell, +3 for that player.
//!   Checked first; when it fires nothing else is scored.
//! - Mixed: all three types are present across both players, +1 for whoever
//!   holds more distinct types there (ties go to the configured player).

use crate::pieces::{PerPlayer, Piece, Player, TypeSet};
use serde::{Deserialize, Serialize};

pub const TRIAD_POINTS: u32 = 3;
pub const MIXED_POINTS: u32 = 1;

/// Which rule produced an award
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreRule {
    Triad,
    Mixed,
}

/// Points earned by one placement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAward {
    pub player: Player,
    pub points: u32,
    pub rule: ScoreRule,
}

/// Distinct types each player holds in a stack
pub fn types_by_owner(stack: &[Piece]) -> PerPlayer<TypeSet> {
    let mut sets = PerPlayer::splat(TypeSet::empty());
    for piece in stack {
        sets[piece.owner].insert(piece.piece_type);
    }
    sets
}

/// Score a whole cell stack. At most one rule fires.
///
/// The triad check looks at White before Black and at the entire stack,
/// not at the piece just placed. When both players hold a triad at the
/// cell, White receives the +3 even if Black's placement completed
/// Black's triad, and Black gets nothing.
pub fn score_cell(stack: &[Piece], tie_break: Player) -> Option<ScoreAward> {
    let sets = types_by_owner(stack);

    if let Some(&player) = Player::ALL.iter().find(|&&p| sets[p].is_full()) {
        return Some(ScoreAward {
            player,
            points: TRIAD_POINTS,
            rule: ScoreRule::Triad,
        });
    }

    let white = sets[Player::White];
    let black = sets[Player::Black];
    if !white.union(black).is_full() {
        return None;
    }

    let player = match white.len().cmp(&black.len()) {
        std::cmp::Ordering::Greater => Player::White,
        std::cmp::Ordering::Less => Player::Black,
        std::cmp::Ordering::Equal => tie_break,
    };

    Some(ScoreAward {
        player,
        points: MIXED_POINTS,
        rule: ScoreRule::Mixed,
    })
}
