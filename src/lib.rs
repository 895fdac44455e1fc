//! Gomoku decision core with a trainable evaluator
//!
//! A 15x15 five-in-a-row engine with asymmetric rules:
//! - Black wins only with exactly five; six or more is an overline
//! - White wins with five or more
//! - Overline, double-four and double-three are forbidden for Black
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and scoped probing
//! - [`rules`]: Line classification, win and forbidden-move checks, adjudication
//! - [`eval`]: Heuristic and neural evaluators plus their weight records
//! - [`search`]: Tactical override (immediate wins and forced blocks)
//! - [`engine`]: Move selector tying the override and an evaluator together
//! - [`training`]: Self-play games and the phased training loop
//!
//! # Quick Start
//!
//! ```
//! use gomoku::eval::HeuristicEvaluator;
//! use gomoku::{AIEngine, Board, Pos, Stone};
//!
//! let mut board = Board::new();
//! let mut engine = AIEngine::with_seed(Box::new(HeuristicEvaluator::default()), 1);
//!
//! board.place(Pos::new(7, 7), Stone::Black);
//!
//! // AI responds as White
//! let pos = engine.select_move(&board, Stone::White);
//! board.place(pos, Stone::White);
//! assert!(!gomoku::is_winning_move(&board, pos, Stone::White));
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod training;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use engine::{AIEngine, MatchMemory, MoveResult, SelectionKind};
pub use error::{ConfigError, PersistError, TrainingError};
pub use eval::{Evaluator, EvaluatorKind};
pub use rules::{is_forbidden_for_black, is_winning_move, judge_move, Verdict};
