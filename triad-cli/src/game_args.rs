//! Game configuration arguments shared by every command
//!
//! A config file (if given) is loaded first; individual flags override it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use triad_core::{GameConfig, Player};

#[derive(Args, Debug, Default)]
pub struct GameArgs {
    /// Game config JSON file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Board side length
    #[arg(long, global = true)]
    pub board_size: Option<usize>,

    /// Pieces of each type per player
    #[arg(long, global = true)]
    pub pieces_per_type: Option<u32>,

    /// Who wins a tied mixed-rule point (white or black)
    #[arg(long, global = true)]
    pub tie_break: Option<Player>,
}

impl GameArgs {
    /// Build the final, validated config
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(size) = self.board_size {
            config.board_size = size;
        }
        if let Some(count) = self.pieces_per_type {
            config.pieces_per_type = count;
        }
        if let Some(player) = self.tie_break {
            config.mixed_tie_break = player;
        }

        config.validate()?;
        tracing::debug!(?config, "resolved game config");
        Ok(config)
    }
}
