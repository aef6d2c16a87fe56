//! Error types

use crate::board::Pos;
use crate::pieces::{PieceType, Player};

/// Errors from engine construction and queries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("position ({x}, {y}) is outside the {board_size}x{board_size} board")]
    InvalidPosition { x: i32, y: i32, board_size: usize },

    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}

/// Why a placement was refused. Checked in declaration order; the first
/// failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("{pos} is off the board")]
    OutOfBounds { pos: Pos },

    #[error("{player} has no {piece_type} left")]
    SupplyExhausted { player: Player, piece_type: PieceType },

    #[error("{player} already has a {piece_type} at {pos}")]
    DuplicatePiece {
        pos: Pos,
        piece_type: PieceType,
        player: Player,
    },

    #[error("a Shield after a Sword must be in line with {anchor} and at most 2 cells away (got {pos})")]
    AdjacencyViolation { pos: Pos, anchor: Pos },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown piece type '{0}' (expected sword, shield or soldier)")]
pub struct ParsePieceTypeError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown player '{0}' (expected white or black)")]
pub struct ParsePlayerError(pub String);
