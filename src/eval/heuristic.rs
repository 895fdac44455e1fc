//! Heuristic evaluation of candidate moves
//!
//! A candidate cell is scored by probing it twice:
//! - Attack: the line tiers `color` would make there, scaled by the attack factor
//! - Defense: the tiers the opponent would make there, scaled by the defense factor
//! - A small bonus for the central 3x3 block
//!
//! The attack and defense factors drift with game results (see
//! [`HeuristicWeights::reward_win`] and [`HeuristicWeights::penalize_loss`]).

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::board::{Board, Pos, Stone};
use crate::error::PersistError;
use crate::rules::classify_all;

use super::features::FeatureVector;
use super::patterns::HeuristicWeights;
use super::record;
use super::{Evaluator, EvaluatorKind};

/// Raw defense sum above which the opponent would get at least an open four.
const DEFENSE_ALERT_THRESHOLD: i64 = 10_000;

/// Flat bonus for blocking a cell that crosses [`DEFENSE_ALERT_THRESHOLD`].
const DEFENSE_ALERT_BONUS: f64 = 1_000.0;

/// Bonus for cells in the central 3x3 block.
const CENTER_BONUS: f64 = 10.0;

/// Score-table evaluator with adaptive attack/defense balance.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
    path: Option<PathBuf>,
}

impl HeuristicEvaluator {
    /// Evaluator with the given weights and no backing file.
    pub fn new(weights: HeuristicWeights) -> Self {
        Self {
            weights,
            path: None,
        }
    }

    /// Evaluator backed by `path`.
    ///
    /// A missing or unreadable record falls back to default weights.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let weights = match record::load_heuristic(&path) {
            Ok(Some(weights)) => {
                info!("loaded heuristic weights from {}", path.display());
                weights
            }
            Ok(None) => {
                info!("no heuristic weights at {}, using defaults", path.display());
                HeuristicWeights::default()
            }
            Err(e) => {
                warn!("{e}; using default heuristic weights");
                HeuristicWeights::default()
            }
        };
        Self {
            weights,
            path: Some(path),
        }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Sum of tier scores `color` would make at `pos`.
    fn raw_line_sum(&self, board: &mut Board, pos: Pos, color: Stone) -> i64 {
        let probe = board.probe(pos, color);
        classify_all(&probe, pos, color)
            .into_iter()
            .map(|tier| self.weights.tier_score(tier))
            .sum()
    }
}

impl Evaluator for HeuristicEvaluator {
    fn score(&self, board: &mut Board, pos: Pos, color: Stone) -> f64 {
        let attack_raw = self.raw_line_sum(board, pos, color);
        let defense_raw = self.raw_line_sum(board, pos, color.opponent());

        let attack = attack_raw as f64 * self.weights.attack_factor;
        let mut defense = defense_raw as f64 * self.weights.defense_factor;
        if defense_raw > DEFENSE_ALERT_THRESHOLD {
            defense += DEFENSE_ALERT_BONUS;
        }

        let center = if pos.is_central() { CENTER_BONUS } else { 0.0 };
        attack + defense + center
    }

    fn learn(&mut self, won: bool, _memory: &[FeatureVector]) -> Result<(), PersistError> {
        if won {
            self.weights.reward_win();
        } else {
            self.weights.penalize_loss();
        }
        self.save()
    }

    fn save(&self) -> Result<(), PersistError> {
        match &self.path {
            Some(path) => {
                record::save_heuristic(path, &self.weights)?;
                debug!("saved heuristic weights to {}", path.display());
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn kind(&self) -> EvaluatorKind {
        EvaluatorKind::Heuristic
    }
}
