use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Board, Pos, Stone};
use crate::engine::AIEngine;
use crate::eval::EvaluatorKind;

/// Anything that can pick a move in a self-play game.
pub trait Agent {
    /// Pick a cell for `color`. Should be empty, though the caller checks.
    fn select_move(&mut self, board: &Board, color: Stone) -> Pos;

    fn name(&self) -> &str;
}

impl Agent for AIEngine {
    fn select_move(&mut self, board: &Board, color: Stone) -> Pos {
        AIEngine::select_move(self, board, color)
    }

    fn name(&self) -> &str {
        match self.evaluator().kind() {
            EvaluatorKind::Heuristic => "heuristic",
            EvaluatorKind::Neural => "neural",
        }
    }
}

/// An agent that plays uniformly at random among the empty cells.
pub struct RandomAgent {
    rng: Xoshiro256PlusPlus,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &Board, _color: Stone) -> Pos {
        let cells: Vec<Pos> = board.empty_cells().collect();
        if cells.is_empty() {
            return Pos::CENTER;
        }
        cells[self.rng.random_range(0..cells.len())]
    }

    fn name(&self) -> &str {
        "random"
    }
}
