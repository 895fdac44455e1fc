//! Self-play training: opponents, the game loop, and progress metrics.

pub mod agent;
pub mod metrics;
pub mod selfplay;

pub use agent::{Agent, RandomAgent};
pub use metrics::{GameResult, TrainingMetrics};
pub use selfplay::{play_game, GameEnd, GameRecord, PhaseSummary, SelfPlayTrainer};
