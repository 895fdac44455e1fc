//! Win condition checking
//!
//! Black wins only with exactly five in a row; six or more is an overline,
//! which the forbidden-move rules handle. White wins with five or more.

use crate::board::{Axis, Board, Pos, Stone};

use super::pattern::scan_line;

/// Whether a run of `run` stones wins for `color`.
#[inline]
pub fn run_wins(run: u8, color: Stone) -> bool {
    match color {
        Stone::Black => run == 5,
        Stone::White => run >= 5,
        Stone::Empty => false,
    }
}

/// Check whether `color` at `pos` completes a winning line.
///
/// `pos` may already hold the stone or still be empty; its own cell is not
/// read. A cell occupied by the other color never wins.
pub fn is_winning_move(board: &Board, pos: Pos, color: Stone) -> bool {
    if color == Stone::Empty || board.get(pos) == color.opponent() {
        return false;
    }
    Axis::ALL
        .iter()
        .any(|&axis| run_wins(scan_line(board, pos, axis, color).run, color))
}
