use std::collections::VecDeque;

use super::selfplay::{GameEnd, GameRecord};

/// Outcome of one training game from the learner's side.
#[derive(Debug, Clone, Copy)]
pub struct GameResult {
    pub learner_won: bool,
    pub end: GameEnd,
    pub game_length: usize,
}

impl From<&GameRecord> for GameResult {
    fn from(record: &GameRecord) -> Self {
        GameResult {
            learner_won: record.learner_won(),
            end: record.reason,
            game_length: record.moves.len(),
        }
    }
}

/// Training metrics tracker with rolling window computations.
pub struct TrainingMetrics {
    results: VecDeque<GameResult>,
    capacity: usize,
    total_games: usize, // lifetime count, never capped
    total_wins: usize,
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            results: VecDeque::with_capacity(capacity),
            capacity,
            total_games: 0,
            total_wins: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_game(&mut self, result: GameResult) {
        self.total_games += 1;
        if result.learner_won {
            self.total_wins += 1;
        }
        self.results.push_back(result);
        if self.results.len() > self.capacity {
            self.results.pop_front();
        }
    }

    fn rate(&self, last_n: usize, pred: impl Fn(&GameResult) -> bool) -> f32 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self.results.iter().rev().take(n).filter(|r| pred(r)).count();
        hits as f32 / n as f32
    }

    /// Learner win rate in the last N games.
    pub fn win_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.learner_won)
    }

    /// Draw rate in the last N games.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| matches!(r.end, GameEnd::Draw))
    }

    /// Share of the last N games ended by a forbidden move.
    pub fn forbidden_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| matches!(r.end, GameEnd::Forbidden(_)))
    }

    /// Average game length over the last N games.
    pub fn average_game_length(&self, last_n: usize) -> f32 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self.results.iter().rev().take(n).map(|r| r.game_length).sum();
        total as f32 / n as f32
    }

    /// Learner win rate over every game recorded.
    pub fn lifetime_win_rate(&self) -> f32 {
        if self.total_games == 0 {
            return 0.0;
        }
        self.total_wins as f32 / self.total_games as f32
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    pub fn total_wins(&self) -> usize {
        self.total_wins
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ForbiddenKind;

    fn result(learner_won: bool, end: GameEnd, game_length: usize) -> GameResult {
        GameResult {
            learner_won,
            end,
            game_length,
        }
    }

    #[test]
    fn test_empty_metrics() {
        let m = TrainingMetrics::new();
        assert_eq!(m.win_rate(100), 0.0);
        assert_eq!(m.average_game_length(100), 0.0);
        assert_eq!(m.lifetime_win_rate(), 0.0);
    }

    #[test]
    fn test_rates() {
        let mut m = TrainingMetrics::new();
        m.record_game(result(true, GameEnd::Five, 10));
        m.record_game(result(false, GameEnd::Draw, 225));
        m.record_game(result(false, GameEnd::Forbidden(ForbiddenKind::DoubleThree), 15));
        m.record_game(result(true, GameEnd::Five, 30));

        assert!((m.win_rate(100) - 0.5).abs() < 1e-6);
        assert!((m.draw_rate(100) - 0.25).abs() < 1e-6);
        assert!((m.forbidden_rate(100) - 0.25).abs() < 1e-6);
        assert!((m.win_rate(2) - 0.5).abs() < 1e-6);
        assert!((m.average_game_length(2) - 22.5).abs() < 1e-6);
    }

    #[test]
    fn test_window_caps_but_lifetime_does_not() {
        let mut m = TrainingMetrics::with_capacity(3);
        for _ in 0..5 {
            m.record_game(result(true, GameEnd::Five, 9));
        }
        for _ in 0..3 {
            m.record_game(result(false, GameEnd::Five, 9));
        }
        assert_eq!(m.win_rate(100), 0.0);
        assert_eq!(m.total_games(), 8);
        assert_eq!(m.total_wins(), 5);
        assert!((m.lifetime_win_rate() - 0.625).abs() < 1e-6);
    }
}
