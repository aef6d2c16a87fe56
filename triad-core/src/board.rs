//! Square board of stacked cells

use crate::config::MAX_BOARD_SIZE;
use crate::pieces::{Piece, PieceType, Player};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board coordinate. Signed so that off-board input can be represented
/// and rejected instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells
    pub fn manhattan_distance(&self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Same column or same row
    pub fn is_aligned_with(&self, other: Pos) -> bool {
        self.x == other.x || self.y == other.y
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// N x N grid; every cell holds its pieces in placement order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Vec<Piece>>,
}

impl Board {
    /// Allocates all `size * size` stacks. Callers bound `size` with
    /// `GameConfig::validate` first.
    pub(crate) fn new(size: usize) -> Self {
        debug_assert!(size <= MAX_BOARD_SIZE);
        Self {
            size,
            cells: vec![Vec::new(); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if this position is on the board
    pub fn contains(&self, pos: Pos) -> bool {
        self.cell_index(pos).is_some()
    }

    fn cell_index(&self, pos: Pos) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }

    /// Pieces stacked at `pos`, oldest first. `None` when off the board.
    pub fn stack(&self, pos: Pos) -> Option<&[Piece]> {
        self.cell_index(pos).map(|i| self.cells[i].as_slice())
    }

    /// Does `owner` already have a `piece_type` at `pos`?
    pub fn has_piece(&self, pos: Pos, piece_type: PieceType, owner: Player) -> bool {
        self.stack(pos)
            .map(|stack| stack.iter().any(|p| p.piece_type == piece_type && p.owner == owner))
            .unwrap_or(false)
    }

    /// Append a piece to the stack at `pos`. Returns false if off the board.
    pub(crate) fn push(&mut self, pos: Pos, piece: Piece) -> bool {
        match self.cell_index(pos) {
            Some(i) => {
                self.cells[i].push(piece);
                true
            }
            None => false,
        }
    }

    /// All positions in row-major order (y outer, x inner)
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let n = self.size as i32;
        (0..n).flat_map(move |y| (0..n).map(move |x| Pos::new(x, y)))
    }

    /// Stacks in row-major order
    pub fn stacks(&self) -> impl Iterator<Item = (Pos, &[Piece])> + '_ {
        self.positions().zip(self.cells.iter().map(Vec::as_slice))
    }

    /// Total pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let board = Board::new(5);
        assert!(board.contains(Pos::new(0, 0)));
        assert!(board.contains(Pos::new(4, 4)));
        assert!(!board.contains(Pos::new(5, 0)));
        assert!(!board.contains(Pos::new(0, -1)));
        assert!(board.stack(Pos::new(-1, 2)).is_none());
    }

    #[test]
    fn test_distance_and_alignment() {
        let a = Pos::new(2, 2);
        assert_eq!(a.manhattan_distance(Pos::new(2, 4)), 2);
        assert_eq!(a.manhattan_distance(Pos::new(3, 3)), 2);
        assert!(a.is_aligned_with(Pos::new(2, 4)));
        assert!(a.is_aligned_with(Pos::new(0, 2)));
        assert!(!a.is_aligned_with(Pos::new(3, 3)));
    }

    #[test]
    fn test_push_keeps_order() {
        let mut board = Board::new(3);
        let pos = Pos::new(1, 2);
        assert!(board.push(pos, Piece::new(PieceType::Sword, Player::White)));
        assert!(board.push(pos, Piece::new(PieceType::Shield, Player::Black)));
        assert!(!board.push(Pos::new(3, 0), Piece::new(PieceType::Sword, Player::White)));

        let stack = board.stack(pos).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack[0].piece_type, PieceType::Sword);
        assert_eq!(stack[1].owner, Player::Black);
        assert!(board.has_piece(pos, PieceType::Shield, Player::Black));
        assert!(!board.has_piece(pos, PieceType::Shield, Player::White));
        assert_eq!(board.piece_count(), 2);
    }

    #[test]
    fn test_positions_row_major() {
        let board = Board::new(2);
        let positions: Vec<_> = board.positions().collect();
        assert_eq!(
            positions,
            vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)]
        );
        assert_eq!(board.stacks().count(), 4);
    }
}
