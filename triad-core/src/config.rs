//! Game configuration

use crate::error::EngineError;
use crate::pieces::Player;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BOARD_SIZE: usize = 5;
pub const DEFAULT_PIECES_PER_TYPE: u32 = 7;

/// Largest accepted board side. Every cell is allocated up front.
pub const MAX_BOARD_SIZE: usize = 256;

/// Tunable parameters for one game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board
    pub board_size: usize,
    /// Starting supply of each piece type, per player
    pub pieces_per_type: u32,
    /// Who gets the mixed-rule point when both players hold the same
    /// number of distinct types at a cell
    pub mixed_tie_break: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            pieces_per_type: DEFAULT_PIECES_PER_TYPE,
            mixed_tie_break: Player::White,
        }
    }
}

impl GameConfig {
    pub fn new(board_size: usize, pieces_per_type: u32) -> Self {
        Self {
            board_size,
            pieces_per_type,
            ..Default::default()
        }
    }

    pub fn with_tie_break(mut self, player: Player) -> Self {
        self.mixed_tie_break = player;
        self
    }

    /// Reject configurations the engine cannot represent. Only the board
    /// size is bounded; any supply is accepted.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.board_size > MAX_BOARD_SIZE {
            return Err(EngineError::InvalidConfig(format!(
                "board_size {} exceeds the maximum of {}",
                self.board_size, MAX_BOARD_SIZE
            )));
        }
        Ok(())
    }

    /// Can every piece be placed, so that the game is able to end?
    ///
    /// A player places a given type at most once per cell, so more than
    /// `board_size^2` pieces of one type can never all be placed. Such a
    /// game is still playable; it just stays in progress.
    pub fn is_completable(&self) -> bool {
        self.pieces_per_type as usize <= self.board_size.saturating_mul(self.board_size)
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}
