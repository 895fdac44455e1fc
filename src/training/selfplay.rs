//! Self-play games and the phased training loop
//!
//! Black always moves first. A game ends on a five, on a forbidden Black
//! move (the other side wins), on an occupied-cell move (forfeit), or on a
//! full board. For the learner anything but a win counts as a loss.

use log::{info, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::TrainingConfig;
use crate::engine::AIEngine;
use crate::error::{ConfigError, TrainingError};
use crate::eval::HeuristicEvaluator;
use crate::rules::{judge_move, ForbiddenKind, Verdict};

use super::agent::{Agent, RandomAgent};
use super::metrics::{GameResult, TrainingMetrics};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// A winning line was completed
    Five,
    /// Black played a forbidden move
    Forbidden(ForbiddenKind),
    /// An agent played an occupied cell
    Forfeit,
    /// The board filled up
    Draw,
}

/// A finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub winner: Option<Stone>,
    /// Moves in play order, Black first
    pub moves: Vec<Pos>,
    pub reason: GameEnd,
    pub learner: Stone,
}

impl GameRecord {
    #[inline]
    pub fn learner_won(&self) -> bool {
        self.winner == Some(self.learner)
    }
}

/// Play one game to the end.
pub fn play_game(
    learner: &mut dyn Agent,
    opponent: &mut dyn Agent,
    learner_color: Stone,
) -> GameRecord {
    let mut board = Board::new();
    let mut moves = Vec::new();
    let mut color = Stone::Black;

    loop {
        let agent: &mut dyn Agent = if color == learner_color {
            &mut *learner
        } else {
            &mut *opponent
        };
        let pos = agent.select_move(&board, color);

        if !board.is_empty(pos) {
            warn!("{} played occupied cell {pos:?} as {color:?}, forfeiting", agent.name());
            return GameRecord {
                winner: Some(color.opponent()),
                moves,
                reason: GameEnd::Forfeit,
                learner: learner_color,
            };
        }

        board.place(pos, color);
        moves.push(pos);

        let (winner, reason) = match judge_move(&board, pos, color) {
            Verdict::Continue => {
                color = color.opponent();
                continue;
            }
            Verdict::Win => (Some(color), GameEnd::Five),
            Verdict::Forbidden(kind) => (Some(color.opponent()), GameEnd::Forbidden(kind)),
            Verdict::Draw => (None, GameEnd::Draw),
        };
        return GameRecord {
            winner,
            moves,
            reason,
            learner: learner_color,
        };
    }
}

/// Games played and won in one phase.
#[derive(Debug, Clone)]
pub struct PhaseSummary {
    pub name: &'static str,
    pub games: usize,
    pub wins: usize,
}

/// Runs the learner through the random phase, then the sparring phase.
pub struct SelfPlayTrainer {
    config: TrainingConfig,
    seed: Option<u64>,
}

impl SelfPlayTrainer {
    pub fn new(config: TrainingConfig) -> Self {
        SelfPlayTrainer { config, seed: None }
    }

    /// Seed the opponents for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn random_opponent(&self) -> RandomAgent {
        match self.seed {
            Some(seed) => RandomAgent::with_seed(seed ^ 0x5eed_0001),
            None => RandomAgent::new(),
        }
    }

    fn sparring_opponent(&self) -> AIEngine {
        let evaluator = Box::new(HeuristicEvaluator::default());
        let mut engine = match self.seed {
            Some(seed) => AIEngine::with_seed(evaluator, seed ^ 0x5eed_0002),
            None => AIEngine::new(evaluator),
        };
        engine.set_tactical_override(self.config.sparring_override);
        engine
    }

    /// Train `learner` through every phase and save its final parameters.
    pub fn train(&self, learner: &mut AIEngine) -> Result<Vec<PhaseSummary>, TrainingError> {
        if self.config.random_games + self.config.sparring_games == 0 {
            return Err(ConfigError::Validation("no training games scheduled".into()).into());
        }

        learner.set_training(true);
        let mut summaries = Vec::new();

        if self.config.random_games > 0 {
            info!("phase 1: {} games against a random mover", self.config.random_games);
            let mut opponent = self.random_opponent();
            summaries.push(self.run_phase("random", learner, &mut opponent, self.config.random_games));
        }
        if self.config.sparring_games > 0 {
            info!("phase 2: {} games against the heuristic engine", self.config.sparring_games);
            let mut opponent = self.sparring_opponent();
            summaries.push(self.run_phase("sparring", learner, &mut opponent, self.config.sparring_games));
        }

        learner.save()?;
        info!("training complete");
        Ok(summaries)
    }

    fn run_phase(
        &self,
        name: &'static str,
        learner: &mut AIEngine,
        opponent: &mut dyn Agent,
        games: usize,
    ) -> PhaseSummary {
        let learner_color = self.config.learner.stone();
        let window = self.config.metrics_window;
        let mut metrics = TrainingMetrics::with_capacity(window);

        for game in 1..=games {
            let record = play_game(learner, opponent, learner_color);
            let result = GameResult::from(&record);
            metrics.record_game(result);

            if let Err(e) = learner.record_outcome(result.learner_won) {
                warn!("game {game}: could not persist weights: {e}");
            }

            if game % self.config.log_interval == 0 {
                info!(
                    "{name} {game}/{games} | win rate {:.1}% (last {window}: {:.1}%) | draws {:.1}% | forbidden {:.1}% | avg length {:.1}",
                    metrics.lifetime_win_rate() * 100.0,
                    metrics.win_rate(window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.forbidden_rate(window) * 100.0,
                    metrics.average_game_length(window),
                );
            }
            if game % self.config.checkpoint_interval == 0 {
                match learner.save() {
                    Ok(()) => info!("checkpoint saved after {name} game {game}"),
                    Err(e) => warn!("checkpoint after {name} game {game} failed: {e}"),
                }
            }
        }

        PhaseSummary {
            name,
            games,
            wins: metrics.total_wins(),
        }
    }
}
