//! Move search for Gomoku AI
//!
//! Contains:
//! - Tactical override: immediate wins and forced blocks ahead of evaluation

pub mod tactical;

pub use tactical::{find_tactical_move, TacticalMove};
