//! Main AI engine: tactical override, evaluation and random tie-break
//!
//! Move selection follows a fixed priority:
//!
//! 1. **Tactical override**: immediate win, forced block of a five, forced
//!    block of a four (see [`crate::search::tactical`])
//! 2. **Evaluation**: every empty cell (minus Black's forbidden cells) is
//!    scored by the active [`Evaluator`]
//! 3. **Tie-break**: one of the best-scoring cells is drawn at random
//!
//! When training is enabled the features of every chosen cell are kept in a
//! [`MatchMemory`] until [`AIEngine::record_outcome`] hands them to the
//! evaluator.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Pos, Stone};
//!
//! let mut engine = AIEngine::with_seed(Box::new(gomoku::eval::HeuristicEvaluator::default()), 7);
//! let mut board = Board::new();
//! board.place(Pos::new(7, 7), Stone::Black);
//!
//! let result = engine.select_move_with_stats(&board, Stone::White);
//! println!("Best move: {:?} ({:?})", result.best_move, result.kind);
//! ```

use std::time::Instant;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::error::PersistError;
use crate::eval::{
    extract_features, Evaluator, EvaluatorKind, FeatureVector, HeuristicEvaluator, NeuralEvaluator,
};
use crate::rules::is_forbidden_for_black;
use crate::search::{find_tactical_move, TacticalMove};

/// How the selected move was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Forced by the tactical override
    Tactical(TacticalMove),
    /// Best evaluator score
    Evaluated,
    /// No cell could be scored; the center point was returned
    Fallback,
}

/// Result of a move selection with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub best_move: Pos,
    /// Evaluator score of the chosen cell (0 for a fallback)
    pub score: f64,
    pub kind: SelectionKind,
    /// Cells that tied for the best score
    pub candidates: usize,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn fallback(time_ms: u64) -> Self {
        Self {
            best_move: Pos::CENTER,
            score: 0.0,
            kind: SelectionKind::Fallback,
            candidates: 0,
            time_ms,
        }
    }
}

/// Feature vectors of the moves played so far in the current game.
#[derive(Debug, Clone, Default)]
pub struct MatchMemory {
    moves: Vec<FeatureVector>,
}

impl MatchMemory {
    pub fn push(&mut self, features: FeatureVector) {
        self.moves.push(features);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn as_slice(&self) -> &[FeatureVector] {
        &self.moves
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

/// Move selector with a pluggable evaluator.
pub struct AIEngine {
    evaluator: Box<dyn Evaluator>,
    /// Tie-break source
    rng: Xoshiro256PlusPlus,
    training: bool,
    /// Run the tactical override before evaluating
    tactical: bool,
    memory: MatchMemory,
}

impl AIEngine {
    /// Engine with an OS-seeded tie-break generator.
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        Self::with_rng(evaluator, Xoshiro256PlusPlus::from_rng(&mut rand::rng()))
    }

    /// Engine whose tie-breaks are reproducible from `seed`.
    pub fn with_seed(evaluator: Box<dyn Evaluator>, seed: u64) -> Self {
        Self::with_rng(evaluator, Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    fn with_rng(evaluator: Box<dyn Evaluator>, rng: Xoshiro256PlusPlus) -> Self {
        Self {
            evaluator,
            rng,
            training: false,
            tactical: true,
            memory: MatchMemory::default(),
        }
    }

    /// Build the evaluator named in `config`, loading its weights record.
    ///
    /// The configured seed drives both network initialization and
    /// tie-breaks.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        };
        let evaluator: Box<dyn Evaluator> = match config.evaluator {
            EvaluatorKind::Heuristic => Box::new(HeuristicEvaluator::load(&config.heuristic_weights)),
            EvaluatorKind::Neural => Box::new(NeuralEvaluator::load(&config.network_weights, &mut rng)),
        };
        Self::with_rng(evaluator, rng)
    }

    /// Enable or disable recording of chosen moves for learning.
    pub fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    #[inline]
    pub fn is_training(&self) -> bool {
        self.training
    }

    /// Enable or disable the tactical override.
    pub fn set_tactical_override(&mut self, enabled: bool) {
        self.tactical = enabled;
    }

    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    pub fn memory(&self) -> &MatchMemory {
        &self.memory
    }

    /// Choose a move for `color`.
    pub fn select_move(&mut self, board: &Board, color: Stone) -> Pos {
        self.select_move_with_stats(board, color).best_move
    }

    /// Choose a move for `color` and report how it was found.
    ///
    /// `board` is never modified; probing happens on a private copy.
    pub fn select_move_with_stats(&mut self, board: &Board, color: Stone) -> MoveResult {
        let start = Instant::now();
        let mut scratch = board.clone();

        if self.tactical {
            if let Some(tactic) = find_tactical_move(board, color) {
                let pos = tactic.pos();
                debug!("{color:?} tactical move {tactic:?}");
                let score = self.evaluator.score(&mut scratch, pos, color);
                self.remember(&mut scratch, pos, color);
                return MoveResult {
                    best_move: pos,
                    score,
                    kind: SelectionKind::Tactical(tactic),
                    candidates: 1,
                    time_ms: start.elapsed().as_millis() as u64,
                };
            }
        }

        let tolerance = self.evaluator.tie_tolerance();
        let mut best_score = f64::NEG_INFINITY;
        let mut best_cells: Vec<Pos> = Vec::new();

        for pos in board.empty_cells() {
            if color == Stone::Black && is_forbidden_for_black(board, pos) {
                continue;
            }
            let score = self.evaluator.score(&mut scratch, pos, color);
            if score > best_score {
                best_score = score;
                best_cells.clear();
                best_cells.push(pos);
            } else if score == best_score || (score - best_score).abs() < tolerance {
                best_cells.push(pos);
            }
        }

        if best_cells.is_empty() {
            debug!("{color:?} has no playable cell, falling back to center");
            return MoveResult::fallback(start.elapsed().as_millis() as u64);
        }

        let pos = best_cells[self.rng.random_range(0..best_cells.len())];
        self.remember(&mut scratch, pos, color);
        MoveResult {
            best_move: pos,
            score: best_score,
            kind: SelectionKind::Evaluated,
            candidates: best_cells.len(),
            time_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn remember(&mut self, scratch: &mut Board, pos: Pos, color: Stone) {
        if self.training {
            self.memory.push(extract_features(scratch, pos, color));
        }
    }

    /// Learn from a finished game and persist the result.
    ///
    /// The match memory is cleared even when persisting fails.
    pub fn record_outcome(&mut self, won: bool) -> Result<(), PersistError> {
        let result = self.evaluator.learn(won, self.memory.as_slice());
        self.memory.clear();
        result
    }

    /// Persist the evaluator's parameters.
    pub fn save(&self) -> Result<(), PersistError> {
        self.evaluator.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TOTAL_CELLS;
    use crate::eval::Network;

    fn heuristic_engine(seed: u64) -> AIEngine {
        AIEngine::with_seed(Box::new(HeuristicEvaluator::default()), seed)
    }

    fn neural_engine(seed: u64) -> AIEngine {
        let net = Network::random(&mut Xoshiro256PlusPlus::seed_from_u64(seed));
        AIEngine::with_seed(Box::new(NeuralEvaluator::new(net)), seed)
    }

    /// Scores (0,0) at 1.0, (0,1) at `runner_up`, everything else at 0.
    struct TwoPeaks {
        runner_up: f64,
    }

    impl Evaluator for TwoPeaks {
        fn score(&self, _board: &mut Board, pos: Pos, _color: Stone) -> f64 {
            match (pos.row, pos.col) {
                (0, 0) => 1.0,
                (0, 1) => self.runner_up,
                _ => 0.0,
            }
        }

        fn tie_tolerance(&self) -> f64 {
            1e-4
        }

        fn learn(&mut self, _won: bool, _memory: &[FeatureVector]) -> Result<(), PersistError> {
            Ok(())
        }

        fn save(&self) -> Result<(), PersistError> {
            Ok(())
        }

        fn kind(&self) -> EvaluatorKind {
            EvaluatorKind::Neural
        }
    }

    fn open_four_for_white() -> Board {
        let mut board = Board::new();
        for c in 4..8 {
            board.place(Pos::new(7, c), Stone::White);
        }
        board.place(Pos::new(0, 0), Stone::Black);
        board.place(Pos::new(14, 14), Stone::Black);
        board.place(Pos::new(0, 14), Stone::Black);
        board
    }

    #[test]
    fn test_blocks_open_four_with_any_evaluator() {
        let board = open_four_for_white();
        let before = board.clone();
        for mut engine in [heuristic_engine(1), neural_engine(1)] {
            let result = engine.select_move_with_stats(&board, Stone::Black);
            assert!(
                result.best_move == Pos::new(7, 3) || result.best_move == Pos::new(7, 8),
                "expected a block, got {:?}",
                result.best_move
            );
            assert!(matches!(result.kind, SelectionKind::Tactical(TacticalMove::BlockFive(_))));
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut board = Board::new();
        for c in 0..4 {
            board.place(Pos::new(9, c), Stone::White);
        }
        board.place(Pos::new(3, 3), Stone::Black);
        let mut engine = neural_engine(2);
        let result = engine.select_move_with_stats(&board, Stone::White);
        assert_eq!(result.best_move, Pos::new(9, 4));
        assert_eq!(result.kind, SelectionKind::Tactical(TacticalMove::Win(Pos::new(9, 4))));
    }

    #[test]
    fn test_empty_board_prefers_center_block() {
        for mut engine in [heuristic_engine(3), neural_engine(3)] {
            let result = engine.select_move_with_stats(&Board::new(), Stone::Black);
            assert_eq!(result.kind, SelectionKind::Evaluated);
            assert_eq!(result.candidates, 9);
            assert!(result.best_move.is_central());
        }
    }

    #[test]
    fn test_near_ties_within_tolerance_are_candidates() {
        let mut engine = AIEngine::with_seed(Box::new(TwoPeaks { runner_up: 1.0 - 5e-5 }), 11);
        let mut picked = Vec::new();
        for _ in 0..40 {
            let result = engine.select_move_with_stats(&Board::new(), Stone::White);
            assert_eq!(result.candidates, 2);
            assert_eq!(result.score, 1.0);
            picked.push(result.best_move);
        }
        assert!(picked.contains(&Pos::new(0, 0)));
        assert!(picked.contains(&Pos::new(0, 1)));
    }

    #[test]
    fn test_gap_beyond_tolerance_is_not_a_tie() {
        let mut engine = AIEngine::with_seed(Box::new(TwoPeaks { runner_up: 1.0 - 1e-3 }), 12);
        let result = engine.select_move_with_stats(&Board::new(), Stone::White);
        assert_eq!(result.candidates, 1);
        assert_eq!(result.best_move, Pos::new(0, 0));
    }

    #[test]
    fn test_black_skips_forbidden_cell() {
        let mut board = Board::new();
        // (7,7) would make two open threes for Black and is otherwise the top score
        for &(r, c) in &[(7, 5), (7, 6), (5, 7), (6, 7)] {
            board.place(Pos::new(r, c), Stone::Black);
        }
        board.place(Pos::new(0, 0), Stone::White);
        board.place(Pos::new(0, 14), Stone::White);
        board.place(Pos::new(14, 0), Stone::White);

        let mut engine = heuristic_engine(4);
        for _ in 0..10 {
            let mv = engine.select_move(&board, Stone::Black);
            assert_ne!(mv, Pos::new(7, 7));
        }
        // White may take it
        let mv = engine.select_move(&board, Stone::White);
        assert_eq!(mv, Pos::new(7, 7));
    }

    #[test]
    fn test_full_board_falls_back_to_center() {
        let mut board = Board::new();
        for idx in 0..TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            let band = (usize::from(pos.col) + 2 * usize::from(pos.row)) / 2 % 2;
            board.place(pos, if band == 0 { Stone::Black } else { Stone::White });
        }
        let mut engine = heuristic_engine(5);
        let result = engine.select_move_with_stats(&board, Stone::White);
        assert_eq!(result.best_move, Pos::CENTER);
        assert_eq!(result.kind, SelectionKind::Fallback);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let mut a = heuristic_engine(42);
        let mut b = heuristic_engine(42);
        let board = Board::new();
        for _ in 0..20 {
            assert_eq!(a.select_move(&board, Stone::Black), b.select_move(&board, Stone::Black));
        }
    }

    #[test]
    fn test_memory_only_while_training() {
        let mut engine = neural_engine(6);
        let board = open_four_for_white();
        engine.select_move(&board, Stone::Black);
        assert!(engine.memory().is_empty());

        engine.set_training(true);
        engine.select_move(&board, Stone::Black);
        engine.select_move(&Board::new(), Stone::Black);
        assert_eq!(engine.memory().len(), 2);
    }

    #[test]
    fn test_record_outcome_trains_and_clears() {
        let mut engine = neural_engine(7);
        engine.set_training(true);
        let board = open_four_for_white();
        engine.select_move(&board, Stone::Black);
        assert_eq!(engine.memory().len(), 1);

        engine.record_outcome(false).unwrap();
        assert!(engine.memory().is_empty());
        assert_eq!(engine.evaluator().kind(), EvaluatorKind::Neural);
    }

    #[test]
    fn test_override_can_be_disabled() {
        let board = open_four_for_white();
        let mut engine = heuristic_engine(8);
        engine.set_tactical_override(false);
        let result = engine.select_move_with_stats(&board, Stone::Black);
        assert_eq!(result.kind, SelectionKind::Evaluated);
    }
}
