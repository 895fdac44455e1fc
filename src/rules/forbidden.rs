//! Forbidden move rules for Black
//!
//! Black may not play a move that makes an overline (six or more), two fours
//! at once, or two open threes at once. A move that makes exactly five wins
//! outright and is never forbidden, so callers check the win first.

use std::fmt;

use crate::board::{Axis, Board, Pos, Stone};

use super::pattern::{scan_line, LineTier};
use super::win::is_winning_move;

/// Why a Black move is forbidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForbiddenKind {
    /// More than five in a row
    Overline,
    /// Two or more fours created at once
    DoubleFour,
    /// Two or more open threes created at once
    DoubleThree,
}

impl fmt::Display for ForbiddenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForbiddenKind::Overline => "overline",
            ForbiddenKind::DoubleFour => "double-four",
            ForbiddenKind::DoubleThree => "double-three",
        };
        f.write_str(name)
    }
}

/// Classify a Black stone at `pos` against the forbidden-move rules.
///
/// This is the raw detector: it does not look for a win, so a caller must
/// rule out an exact five first (see [`is_forbidden_for_black`]). A cell held
/// by White is never forbidden.
pub fn forbidden_kind(board: &Board, pos: Pos) -> Option<ForbiddenKind> {
    if board.get(pos) == Stone::White {
        return None;
    }

    let mut fours = 0u8;
    let mut open_threes = 0u8;

    for axis in Axis::ALL {
        let scan = scan_line(board, pos, axis, Stone::Black);
        if scan.run > 5 {
            return Some(ForbiddenKind::Overline);
        }
        if scan.run < 5 {
            match scan.tier() {
                LineTier::OpenFour | LineTier::ClosedFour => fours += 1,
                LineTier::OpenThree => open_threes += 1,
                _ => {}
            }
        }
    }

    if fours >= 2 {
        Some(ForbiddenKind::DoubleFour)
    } else if open_threes >= 2 {
        Some(ForbiddenKind::DoubleThree)
    } else {
        None
    }
}

/// Check if a Black stone at `pos` is a forbidden move.
///
/// An exact five wins and therefore is never forbidden, even when another
/// axis would otherwise trip a rule.
pub fn is_forbidden_for_black(board: &Board, pos: Pos) -> bool {
    !is_winning_move(board, pos, Stone::Black) && forbidden_kind(board, pos).is_some()
}
