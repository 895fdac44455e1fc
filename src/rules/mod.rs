//! Game rules for Gomoku with Black-only restrictions
//!
//! This module implements the rule set:
//! - Line pattern classification shared by every rule and evaluator
//! - Win conditions (exactly five for Black, five or more for White)
//! - Forbidden moves for Black (overline, double-four, double-three)
//! - Move adjudication

pub mod forbidden;
pub mod pattern;
pub mod win;

use crate::board::{Board, Pos, Stone};

// Re-exports for convenient access
pub use forbidden::{forbidden_kind, is_forbidden_for_black, ForbiddenKind};
pub use pattern::{classify, classify_all, scan_line, LineScan, LineTier};
pub use win::{is_winning_move, run_wins};

/// What a just-played stone means for the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The mover completed a winning line
    Win,
    /// Black broke a forbidden-move rule and loses
    Forbidden(ForbiddenKind),
    /// The board filled up without a winner
    Draw,
    /// Play goes on
    Continue,
}

/// Adjudicate the stone `color` just placed at `pos`.
///
/// Checked in order: win, forbidden move (Black only), full board.
pub fn judge_move(board: &Board, pos: Pos, color: Stone) -> Verdict {
    if is_winning_move(board, pos, color) {
        return Verdict::Win;
    }
    if color == Stone::Black {
        if let Some(kind) = forbidden_kind(board, pos) {
            return Verdict::Forbidden(kind);
        }
    }
    if board.is_full() {
        return Verdict::Draw;
    }
    Verdict::Continue
}
