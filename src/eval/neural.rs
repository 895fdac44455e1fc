//! Trainable evaluator backed by [`Network`]

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rand::Rng;

use crate::board::{Board, Pos, Stone};
use crate::error::PersistError;

use super::features::{extract_features, FeatureVector};
use super::network::Network;
use super::record;
use super::{Evaluator, EvaluatorKind};

/// Nudge towards the central 3x3 block.
const CENTER_NUDGE: f64 = 0.05;

/// Outputs this close to the best are collected as ties.
const TIE_TOLERANCE: f64 = 1e-4;

/// Training target for moves of the winning side.
const WIN_TARGET: f64 = 1.0;
const LOSS_TARGET: f64 = 0.0;

#[derive(Debug, Clone)]
pub struct NeuralEvaluator {
    network: Network,
    path: Option<PathBuf>,
}

impl NeuralEvaluator {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            path: None,
        }
    }

    /// Evaluator backed by `path`.
    ///
    /// A missing or unreadable record falls back to a network drawn from `rng`.
    pub fn load<R: Rng>(path: impl Into<PathBuf>, rng: &mut R) -> Self {
        let path = path.into();
        let network = match record::load_network(&path) {
            Ok(Some(network)) => {
                info!("loaded network weights from {}", path.display());
                network
            }
            Ok(None) => {
                info!("no network weights at {}, starting from random weights", path.display());
                Network::random(rng)
            }
            Err(e) => {
                warn!("{e}; starting from random network weights");
                Network::random(rng)
            }
        };
        Self {
            network,
            path: Some(path),
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Evaluator for NeuralEvaluator {
    fn score(&self, board: &mut Board, pos: Pos, color: Stone) -> f64 {
        let features = extract_features(board, pos, color);
        let nudge = if pos.is_central() { CENTER_NUDGE } else { 0.0 };
        self.network.forward(&features) + nudge
    }

    fn tie_tolerance(&self) -> f64 {
        TIE_TOLERANCE
    }

    /// One backpropagation step per recorded move.
    fn learn(&mut self, won: bool, memory: &[FeatureVector]) -> Result<(), PersistError> {
        let target = if won { WIN_TARGET } else { LOSS_TARGET };
        for features in memory {
            self.network.train(features, target);
        }
        self.save()
    }

    fn save(&self) -> Result<(), PersistError> {
        match &self.path {
            Some(path) => {
                record::save_network(path, &self.network)?;
                debug!("saved network weights to {}", path.display());
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn kind(&self) -> EvaluatorKind {
        EvaluatorKind::Neural
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn seeded(seed: u64) -> NeuralEvaluator {
        NeuralEvaluator::new(Network::random(&mut Xoshiro256PlusPlus::seed_from_u64(seed)))
    }

    fn probe_vector() -> FeatureVector {
        FeatureVector([1.0, 0.0, 1.0, 2.0, 0.0, 1.0, 1.0, 0.0])
    }

    #[test]
    fn test_center_nudge() {
        let eval = seeded(1);
        let mut board = Board::new();
        // Both cells have empty feature vectors on an empty board
        let center = eval.score(&mut board, Pos::new(7, 7), Stone::Black);
        let edge = eval.score(&mut board, Pos::new(0, 7), Stone::Black);
        assert!((center - edge - CENTER_NUDGE).abs() < 1e-12);
        assert!(board.is_board_empty());
    }

    #[test]
    fn test_score_leaves_board_unchanged() {
        let eval = seeded(2);
        let mut board = Board::new();
        board.place(Pos::new(7, 7), Stone::Black);
        board.place(Pos::new(7, 8), Stone::White);
        board.place(Pos::new(8, 8), Stone::Black);
        let before = board.clone();
        for pos in before.empty_cells() {
            eval.score(&mut board, pos, Stone::White);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_learn_one_step_per_vector() {
        let mut eval = seeded(3);
        let mut reference = eval.network().clone();
        let memory = [probe_vector(), probe_vector(), FeatureVector::default()];

        eval.learn(true, &memory).unwrap();
        for v in &memory {
            reference.train(v, 1.0);
        }
        assert_eq!(*eval.network(), reference);
    }

    #[test]
    fn test_learn_loss_lowers_output() {
        let mut eval = seeded(4);
        let x = probe_vector();
        let before = eval.network().forward(&x);
        eval.learn(false, &[x; 10]).unwrap();
        assert!(eval.network().forward(&x) < before);
    }

    #[test]
    fn test_save_then_load_reproduces_forward() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nn_weights.txt");
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(10);

        let mut eval = NeuralEvaluator::load(&path, &mut rng);
        eval.learn(true, &[probe_vector()]).unwrap();

        let fresh = NeuralEvaluator::load(&path, &mut rng);
        let x = probe_vector();
        assert_eq!(
            fresh.network().forward(&x).to_bits(),
            eval.network().forward(&x).to_bits()
        );
    }

    #[test]
    fn test_scoring_occupied_cell_keeps_stone() {
        let eval = seeded(5);
        let mut board = Board::new();
        board.place(Pos::new(7, 7), Stone::Black);
        let before = board.clone();
        eval.score(&mut board, Pos::new(7, 7), Stone::White);
        assert_eq!(board, before);
    }

    #[test]
    fn test_nan_record_uses_rng() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nn_weights.txt");
        let text = record::format_network(&seeded(6).network);
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        let (_, rest) = lines[1].split_once(' ').unwrap();
        lines[1] = format!("NaN {rest}");
        std::fs::write(&path, lines.join("\n")).unwrap();

        let eval = NeuralEvaluator::load(&path, &mut Xoshiro256PlusPlus::seed_from_u64(8));
        let expected = Network::random(&mut Xoshiro256PlusPlus::seed_from_u64(8));
        assert_eq!(*eval.network(), expected);
        let x = probe_vector();
        assert!(eval.network().forward(&x).is_finite());
    }

    #[test]
    fn test_missing_record_uses_rng() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let a = NeuralEvaluator::load(&path, &mut Xoshiro256PlusPlus::seed_from_u64(8));
        let b = NeuralEvaluator::load(&path, &mut Xoshiro256PlusPlus::seed_from_u64(8));
        assert_eq!(a.network(), b.network());
        assert!(!path.exists());
    }
}
