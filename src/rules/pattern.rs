//! Line pattern classification
//!
//! Every rule check and every evaluator reads line shapes through this module,
//! so a given (position, axis, color) always yields the same tier no matter
//! who asks.

use crate::board::{Axis, Board, Pos, Stone};

/// Shape of the line through a stone, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineTier {
    None,
    OpenTwo,
    OpenThree,
    ClosedFour,
    OpenFour,
    Five,
}

impl LineTier {
    /// Open or closed four: one move away from five.
    #[inline]
    pub fn is_four(self) -> bool {
        matches!(self, LineTier::OpenFour | LineTier::ClosedFour)
    }
}

/// Raw measurement of the contiguous run through a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineScan {
    /// Stones in the run, the scanned position included
    pub run: u8,
    /// Empty cells directly beyond each end of the run (0..=2)
    pub open_ends: u8,
}

impl LineScan {
    /// Tier for this run/open-end combination.
    pub fn tier(self) -> LineTier {
        match (self.run, self.open_ends) {
            (5.., _) => LineTier::Five,
            (4, 2) => LineTier::OpenFour,
            (4, 1) => LineTier::ClosedFour,
            (3, 2) => LineTier::OpenThree,
            (2, 2) => LineTier::OpenTwo,
            _ => LineTier::None,
        }
    }
}

/// Walk one way from `pos`, returning (same-color stones, end cell is empty).
fn walk(board: &Board, pos: Pos, axis: Axis, sign: i32, color: Stone) -> (u8, bool) {
    let mut count = 0u8;
    let mut step = 1;
    loop {
        match pos.offset(axis, sign * step) {
            Some(p) if board.get(p) == color => {
                count += 1;
                step += 1;
            }
            // Off-board never counts as open
            Some(p) => return (count, board.is_empty(p)),
            None => return (count, false),
        }
    }
}

/// Measure the run of `color` through `pos` along `axis`.
///
/// `pos` itself is counted as a `color` stone and its cell is never read, so
/// the scan gives the same answer before and after the stone is placed.
pub fn scan_line(board: &Board, pos: Pos, axis: Axis, color: Stone) -> LineScan {
    let (forward, forward_open) = walk(board, pos, axis, 1, color);
    let (backward, backward_open) = walk(board, pos, axis, -1, color);
    LineScan {
        run: 1 + forward + backward,
        open_ends: u8::from(forward_open) + u8::from(backward_open),
    }
}

/// Classify the line of `color` through `pos` along `axis`.
#[inline]
pub fn classify(board: &Board, pos: Pos, axis: Axis, color: Stone) -> LineTier {
    scan_line(board, pos, axis, color).tier()
}

/// Tiers along all four axes, in [`Axis::ALL`] order.
pub fn classify_all(board: &Board, pos: Pos, color: Stone) -> [LineTier; 4] {
    Axis::ALL.map(|axis| classify(board, pos, axis, color))
}
