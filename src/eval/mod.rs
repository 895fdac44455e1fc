//! Candidate-move evaluation
//!
//! Two interchangeable strategies score a single empty cell for the side to
//! move. Both read line shapes through [`crate::rules::classify_all`] and both
//! learn from finished games:
//!
//! - [`HeuristicEvaluator`]: tier score table with adaptive attack/defense factors
//! - [`NeuralEvaluator`]: small perceptron over an 8-slot [`FeatureVector`]

pub mod features;
pub mod heuristic;
pub mod network;
pub mod neural;
pub mod patterns;
pub mod record;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};
use crate::error::PersistError;

pub use features::{extract_features, FeatureVector, FEATURE_COUNT};
pub use heuristic::HeuristicEvaluator;
pub use network::Network;
pub use neural::NeuralEvaluator;
pub use patterns::HeuristicWeights;

/// Which evaluator a selector runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    Heuristic,
    #[default]
    Neural,
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorKind::Heuristic => write!(f, "heuristic"),
            EvaluatorKind::Neural => write!(f, "neural"),
        }
    }
}

/// Scoring strategy for the move selector.
pub trait Evaluator {
    /// Score `color` playing the empty cell `pos`; higher is better.
    ///
    /// Implementations may probe the board but must leave it as they found it.
    fn score(&self, board: &mut Board, pos: Pos, color: Stone) -> f64;

    /// Scores closer than this to the best are treated as ties.
    fn tie_tolerance(&self) -> f64 {
        0.0
    }

    /// Update parameters from a finished game, then persist them.
    ///
    /// `memory` holds the feature vectors of the moves the learning side
    /// played. The parameter update is kept even if persisting fails.
    fn learn(&mut self, won: bool, memory: &[FeatureVector]) -> Result<(), PersistError>;

    /// Persist parameters to the configured path, if any.
    fn save(&self) -> Result<(), PersistError>;

    fn kind(&self) -> EvaluatorKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_cli_names_match_display() {
        for kind in EvaluatorKind::value_variants() {
            assert_eq!(EvaluatorKind::from_str(&kind.to_string(), false), Ok(*kind));
        }
        assert!(EvaluatorKind::from_str("minimax", false).is_err());
    }

    #[test]
    fn test_kind_display_matches_serde() {
        #[derive(Deserialize)]
        struct Wrapper {
            kind: EvaluatorKind,
        }
        for kind in [EvaluatorKind::Heuristic, EvaluatorKind::Neural] {
            let parsed: Wrapper = toml::from_str(&format!("kind = \"{kind}\"")).unwrap();
            assert_eq!(parsed.kind, kind);
        }
    }
}
