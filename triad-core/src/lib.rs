//! TRIAD Core - Rules engine
//!
//! This crate provides the game logic for TRIAD:
//! - Players, piece types and per-player supply
//! - Square board where each cell stacks pieces from both players
//! - Placement legality (bounds, supply, duplicates, the Sword/Shield rule)
//! - Triad and mixed cell scoring
//! - Turn order and end-of-game detection

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod pieces;
pub mod scoring;

// Re-exports for convenient access
pub use board::{Board, Pos};
pub use config::{GameConfig, DEFAULT_BOARD_SIZE, DEFAULT_PIECES_PER_TYPE, MAX_BOARD_SIZE};
pub use error::{EngineError, ParsePieceTypeError, ParsePlayerError, Rejection};
pub use game::{
    GameOutcome, GameStatus, LastPlaced, PlacementOutcome, PlacementRecord, RulesEngine, Snapshot,
    SHIELD_REACH,
};
pub use pieces::{Inventory, PerPlayer, PerType, Piece, PieceType, Player, TypeSet};
pub use scoring::{score_cell, ScoreAward, ScoreRule, MIXED_POINTS, TRIAD_POINTS};
