//! Rules engine: placement legality, scoring, turns and game end

use crate::board::{Board, Pos};
use crate::config::GameConfig;
use crate::error::{EngineError, Rejection};
use crate::pieces::{Inventory, PerPlayer, PerType, Piece, PieceType, Player};
use crate::scoring::{score_cell, ScoreAward};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Largest Manhattan distance allowed for a Shield following a Sword
pub const SHIELD_REACH: u32 = 2;

// ============================================================================
// CORE TYPES
// ============================================================================

/// How a finished game turned out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// Derived from the inventory: the game ends once every supply is empty
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    InProgress,
    Ended(GameOutcome),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Ended(_))
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Ended(GameOutcome::Win(player)) => Some(player),
            _ => None,
        }
    }
}

/// Most recent accepted placement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPlaced {
    pub pos: Pos,
    pub piece_type: PieceType,
}

/// One accepted placement, as recorded in the game history
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub pos: Pos,
    pub piece: Piece,
    pub award: Option<ScoreAward>,
}

/// Result of an accepted placement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub pos: Pos,
    pub piece: Piece,
    pub award: Option<ScoreAward>,
    pub status: GameStatus,
}

/// Serializable copy of everything a collaborator can observe
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board_size: usize,
    /// Stacks in row-major order: index `y * board_size + x`
    pub cells: Vec<Vec<Piece>>,
    pub remaining: PerPlayer<PerType<u32>>,
    pub scores: PerPlayer<u32>,
    pub current_player: Player,
    pub last_placed: Option<LastPlaced>,
    pub status: GameStatus,
}

// ============================================================================
// RULES ENGINE
// ============================================================================

/// Full game state. One instance per game; build a new one to start over.
///
/// Not internally synchronized: callers sharing an engine across threads
/// wrap it in a `Mutex` or `RwLock`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulesEngine {
    config: GameConfig,
    board: Board,
    inventory: Inventory,
    scores: PerPlayer<u32>,
    current_player: Player,
    /// `None` until the first placement
    last_placed: Option<LastPlaced>,
    history: Vec<PlacementRecord>,
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::from_valid_config(GameConfig::default())
    }
}

impl RulesEngine {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Any supply is accepted. When it cannot all fit on the board the
    /// game never ends; `GameConfig::is_completable` tells in advance.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        if !config.is_completable() {
            tracing::warn!(
                board_size = config.board_size,
                pieces_per_type = config.pieces_per_type,
                "not every piece fits on the board; this game cannot end"
            );
        }
        Ok(Self::from_valid_config(config))
    }

    /// Engine with the default tie-break
    pub fn with_size(board_size: usize, pieces_per_type: u32) -> Result<Self, EngineError> {
        Self::new(GameConfig::new(board_size, pieces_per_type))
    }

    fn from_valid_config(config: GameConfig) -> Self {
        Self {
            board: Board::new(config.board_size),
            inventory: Inventory::new(config.pieces_per_type),
            scores: PerPlayer::splat(0),
            current_player: Player::White,
            last_placed: None,
            history: Vec::new(),
            config,
        }
    }

    // ========================================================================
    // PLACEMENT
    // ========================================================================

    /// Attempt a placement for the current player. Returns whether it was
    /// accepted; a rejected placement leaves the engine untouched.
    pub fn try_place(&mut self, x: i32, y: i32, piece_type: PieceType) -> bool {
        self.place(x, y, piece_type).is_ok()
    }

    /// Like `try_place`, but reports why a placement was refused
    pub fn place(
        &mut self,
        x: i32,
        y: i32,
        piece_type: PieceType,
    ) -> Result<PlacementOutcome, Rejection> {
        let pos = Pos::new(x, y);
        if let Err(rejection) = self.check_placement(x, y, piece_type) {
            tracing::trace!(%rejection, "placement rejected");
            return Err(rejection);
        }

        let player = self.current_player;
        let piece = Piece::new(piece_type, player);
        self.board.push(pos, piece);
        self.inventory.take(player, piece_type);

        let award = self.apply_scoring(pos);

        self.last_placed = Some(LastPlaced { pos, piece_type });
        self.current_player = player.opponent();
        self.history.push(PlacementRecord { pos, piece, award });

        tracing::debug!(%player, %piece_type, %pos, "placed");

        let status = self.status();
        if let GameStatus::Ended(outcome) = status {
            tracing::info!(
                ?outcome,
                white = self.scores[Player::White],
                black = self.scores[Player::Black],
                "game over"
            );
        }

        Ok(PlacementOutcome {
            pos,
            piece,
            award,
            status,
        })
    }

    /// Run every legality check for the current player without placing
    pub fn check_placement(&self, x: i32, y: i32, piece_type: PieceType) -> Result<(), Rejection> {
        let pos = Pos::new(x, y);
        let player = self.current_player;

        if !self.board.contains(pos) {
            return Err(Rejection::OutOfBounds { pos });
        }
        if self.inventory.remaining(player, piece_type) == 0 {
            return Err(Rejection::SupplyExhausted { player, piece_type });
        }
        if self.board.has_piece(pos, piece_type, player) {
            return Err(Rejection::DuplicatePiece {
                pos,
                piece_type,
                player,
            });
        }
        self.check_adjacency(pos, piece_type)
    }

    /// A Shield placed right after a Sword must share a row or column with
    /// that Sword and sit within `SHIELD_REACH`. Nothing else is constrained.
    fn check_adjacency(&self, pos: Pos, piece_type: PieceType) -> Result<(), Rejection> {
        let last = match self.last_placed {
            Some(last) => last,
            None => return Ok(()),
        };

        if last.piece_type == PieceType::Sword && piece_type == PieceType::Shield {
            let anchor = last.pos;
            if !pos.is_aligned_with(anchor) || pos.manhattan_distance(anchor) > SHIELD_REACH {
                return Err(Rejection::AdjacencyViolation { pos, anchor });
            }
        }
        Ok(())
    }

    fn apply_scoring(&mut self, pos: Pos) -> Option<ScoreAward> {
        let stack = self.board.stack(pos)?;
        let award = score_cell(stack, self.config.mixed_tie_break)?;
        self.scores[award.player] += award.points;
        tracing::debug!(
            player = %award.player,
            points = award.points,
            rule = ?award.rule,
            %pos,
            "scored"
        );
        Some(award)
    }

    /// Cells where the current player may place `piece_type` now
    pub fn legal_placements(&self, piece_type: PieceType) -> Vec<Pos> {
        self.board
            .positions()
            .filter(|pos| self.check_placement(pos.x, pos.y, piece_type).is_ok())
            .collect()
    }

    /// Can the current player place anything at all?
    pub fn has_legal_placement(&self) -> bool {
        PieceType::ALL.iter().any(|&pt| {
            self.board
                .positions()
                .any(|pos| self.check_placement(pos.x, pos.y, pt).is_ok())
        })
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Pieces stacked at a cell, oldest first
    pub fn pieces_at(&self, x: i32, y: i32) -> Result<&[Piece], EngineError> {
        self.board
            .stack(Pos::new(x, y))
            .ok_or(EngineError::InvalidPosition {
                x,
                y,
                board_size: self.board.size(),
            })
    }

    pub fn remaining(&self, player: Player, piece_type: PieceType) -> u32 {
        self.inventory.remaining(player, piece_type)
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player]
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        if !self.inventory.is_exhausted() {
            return GameStatus::InProgress;
        }
        let white = self.scores[Player::White];
        let black = self.scores[Player::Black];
        let outcome = match white.cmp(&black) {
            Ordering::Greater => GameOutcome::Win(Player::White),
            Ordering::Less => GameOutcome::Win(Player::Black),
            Ordering::Equal => GameOutcome::Draw,
        };
        GameStatus::Ended(outcome)
    }

    pub fn last_placed(&self) -> Option<LastPlaced> {
        self.last_placed
    }

    pub fn is_first_move(&self) -> bool {
        self.last_placed.is_none()
    }

    pub fn board_size(&self) -> usize {
        self.board.size()
    }

    pub fn pieces_per_type(&self) -> u32 {
        self.config.pieces_per_type
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Accepted placements in order
    pub fn history(&self) -> &[PlacementRecord] {
        &self.history
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut remaining = PerPlayer::splat(PerType::splat(0));
        for player in Player::ALL {
            for pt in PieceType::ALL {
                remaining[player][pt] = self.inventory.remaining(player, pt);
            }
        }

        Snapshot {
            board_size: self.board.size(),
            cells: self.board.stacks().map(|(_, stack)| stack.to_vec()).collect(),
            remaining,
            scores: self.scores,
            current_player: self.current_player,
            last_placed: self.last_placed,
            status: self.status(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
