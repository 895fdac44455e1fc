//! Tactical override run before any evaluator
//!
//! Every empty cell is examined in row-major order:
//! 1. A cell that wins for the mover is returned at once
//! 2. Otherwise a cell that would win for the opponent is returned at once
//! 3. Otherwise a cell where the opponent would make a four is remembered;
//!    the last such cell in scan order is returned once the scan ends
//!
//! The scan is hypothetical: the rule functions treat the examined cell as
//! holding the tested color, so the board is only read.

use crate::board::{Board, Pos, Stone};
use crate::rules::{classify_all, is_winning_move};

/// A move forced by the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TacticalMove {
    /// Completes a winning line for the mover
    Win(Pos),
    /// Takes the cell the opponent would win on
    BlockFive(Pos),
    /// Takes a cell where the opponent would make a four
    BlockFour(Pos),
}

impl TacticalMove {
    #[inline]
    pub fn pos(self) -> Pos {
        match self {
            TacticalMove::Win(p) | TacticalMove::BlockFive(p) | TacticalMove::BlockFour(p) => p,
        }
    }
}

/// Find a decisive move for `color`, if the position has one.
pub fn find_tactical_move(board: &Board, color: Stone) -> Option<TacticalMove> {
    let opponent = color.opponent();
    let mut four_block = None;

    for pos in board.empty_cells() {
        if is_winning_move(board, pos, color) {
            return Some(TacticalMove::Win(pos));
        }
        if is_winning_move(board, pos, opponent) {
            return Some(TacticalMove::BlockFive(pos));
        }
        if classify_all(board, pos, opponent).iter().any(|t| t.is_four()) {
            four_block = Some(TacticalMove::BlockFour(pos));
        }
    }

    four_block
}
