//! Players, piece types and per-player supply

use crate::error::{ParsePieceTypeError, ParsePlayerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

impl FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Player::White),
            "black" | "b" => Ok(Player::Black),
            _ => Err(ParsePlayerError(s.to_string())),
        }
    }
}

/// The three placeable piece types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Sword = 0,
    Shield = 1,
    Soldier = 2,
}

impl PieceType {
    pub const ALL: [PieceType; 3] = [PieceType::Sword, PieceType::Shield, PieceType::Soldier];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceType::Sword => "Sword",
            PieceType::Shield => "Shield",
            PieceType::Soldier => "Soldier",
        }
    }

    /// Single-letter code used by the text renderer and the short parse form
    pub fn letter(self) -> char {
        match self {
            PieceType::Sword => 'S',
            PieceType::Shield => 'H',
            PieceType::Soldier => 'O',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PieceType {
    type Err = ParsePieceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sword" | "s" => Ok(PieceType::Sword),
            "shield" | "h" => Ok(PieceType::Shield),
            "soldier" | "o" => Ok(PieceType::Soldier),
            _ => Err(ParsePieceTypeError(s.to_string())),
        }
    }
}

/// A piece on the board. Never changes once placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub owner: Player,
}

impl Piece {
    pub const fn new(piece_type: PieceType, owner: Player) -> Self {
        Self { piece_type, owner }
    }
}

// ============================================================================
// ENUM-INDEXED STORAGE
// ============================================================================

/// One value per player, indexed by `Player`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerPlayer<T>(pub [T; 2]);

impl<T: Copy> PerPlayer<T> {
    pub const fn splat(value: T) -> Self {
        Self([value; 2])
    }
}

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &T {
        &self.0[player.index()]
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut T {
        &mut self.0[player.index()]
    }
}

/// One value per piece type, indexed by `PieceType`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerType<T>(pub [T; 3]);

impl<T: Copy> PerType<T> {
    pub const fn splat(value: T) -> Self {
        Self([value; 3])
    }
}

impl<T> Index<PieceType> for PerType<T> {
    type Output = T;

    fn index(&self, piece_type: PieceType) -> &T {
        &self.0[piece_type.index()]
    }
}

impl<T> IndexMut<PieceType> for PerType<T> {
    fn index_mut(&mut self, piece_type: PieceType) -> &mut T {
        &mut self.0[piece_type.index()]
    }
}

// ============================================================================
// INVENTORY
// ============================================================================

/// Remaining pieces for each (player, type) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: PerPlayer<PerType<u32>>,
}

impl Inventory {
    pub fn new(pieces_per_type: u32) -> Self {
        Self {
            counts: PerPlayer::splat(PerType::splat(pieces_per_type)),
        }
    }

    pub fn remaining(&self, player: Player, piece_type: PieceType) -> u32 {
        self.counts[player][piece_type]
    }

    /// Take one piece out of the supply. Returns false (and changes nothing)
    /// if that supply is already empty.
    pub fn take(&mut self, player: Player, piece_type: PieceType) -> bool {
        let count = &mut self.counts[player][piece_type];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Total pieces left for one player
    pub fn total(&self, player: Player) -> u32 {
        self.counts[player].0.iter().sum()
    }

    /// True once every player has used every piece
    pub fn is_exhausted(&self) -> bool {
        Player::ALL.iter().all(|&p| self.total(p) == 0)
    }
}

// ============================================================================
// TYPE SET
// ============================================================================

/// Set of distinct piece types (3-bit mask)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeSet(u8);

impl TypeSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, piece_type: PieceType) {
        self.0 |= 1 << piece_type.index();
    }

    pub fn contains(self, piece_type: PieceType) -> bool {
        self.0 & (1 << piece_type.index()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_full(self) -> bool {
        self.len() == PieceType::ALL.len()
    }

    pub fn union(self, other: TypeSet) -> TypeSet {
        TypeSet(self.0 | other.0)
    }
}

impl FromIterator<PieceType> for TypeSet {
    fn from_iter<I: IntoIterator<Item = PieceType>>(iter: I) -> Self {
        let mut set = TypeSet::empty();
        for piece_type in iter {
            set.insert(piece_type);
        }
        set
    }
}
