//! Board structure with scoped probing

use std::ops::Deref;

use super::bitboard::Bitboard;
use super::{Pos, Stone, TOTAL_CELLS};

/// Game board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Check if signed coordinates fall on the board
    #[inline]
    pub fn is_valid(&self, row: i32, col: i32) -> bool {
        Pos::is_valid(row, col)
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone on an empty cell
    #[inline]
    pub fn place(&mut self, pos: Pos, stone: Stone) {
        debug_assert!(self.is_empty(pos), "place on occupied cell {pos:?}");
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    /// Remove whatever stone sits at `pos`
    #[inline]
    pub fn undo(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Place `stone` at `pos` for the lifetime of the returned guard.
    ///
    /// Whatever sat at `pos` before, empty or not, is restored when the guard
    /// is dropped, so a probe can never leak past the scope that created it,
    /// early returns included.
    #[inline]
    pub fn probe(&mut self, pos: Pos, stone: Stone) -> Probe<'_> {
        let previous = self.get(pos);
        self.undo(pos);
        self.place(pos, stone);
        Probe {
            board: self,
            pos,
            previous,
        }
    }

    /// Cells holding a stone of either color
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black.union(&self.white)
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.occupied().count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize >= TOTAL_CELLS
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> {
        let occupied = self.occupied();
        (0..TOTAL_CELLS)
            .map(Pos::from_index)
            .filter(move |&pos| !occupied.get(pos))
    }
}

/// A stone placed by [`Board::probe`], reverted on drop.
#[derive(Debug)]
pub struct Probe<'a> {
    board: &'a mut Board,
    pos: Pos,
    previous: Stone,
}

impl Probe<'_> {
    /// Where the probed stone sits
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for Probe<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.board.undo(self.pos);
        self.board.place(self.pos, self.previous);
    }
}
