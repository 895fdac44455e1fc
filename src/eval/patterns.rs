//! Pattern scores for heuristic evaluation
//!
//! The tier scores are fixed by default but live in a [`HeuristicWeights`]
//! record together with the attack/defense factors that learning adjusts.

use crate::rules::LineTier;

/// Lower/upper bounds for the attack factor.
pub const ATTACK_FACTOR_RANGE: (f64, f64) = (0.5, 2.0);
/// Lower/upper bounds for the defense factor.
pub const DEFENSE_FACTOR_RANGE: (f64, f64) = (1.0, 2.5);

/// Attack factor gain after a win, and loss after a defeat.
pub const ATTACK_STEP: f64 = 0.05;
/// Defense factor gain after a defeat.
pub const DEFENSE_STEP: f64 = 0.10;

/// Score for a line that forms no recognized shape.
pub const NONE_SCORE: i64 = 1;

/// Tunable parameters of the heuristic evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicWeights {
    pub five: i64,
    pub open_four: i64,
    pub closed_four: i64,
    pub open_three: i64,
    pub open_two: i64,
    /// Multiplier on the value of our own shapes
    pub attack_factor: f64,
    /// Multiplier on the value of blocking the opponent's shapes
    pub defense_factor: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            five: 100_000,
            open_four: 10_000,
            closed_four: 5_000,
            open_three: 1_000,
            open_two: 50,
            attack_factor: 1.0,
            defense_factor: 1.0,
        }
    }
}

impl HeuristicWeights {
    /// Score for a single line tier.
    #[inline]
    pub fn tier_score(&self, tier: LineTier) -> i64 {
        match tier {
            LineTier::Five => self.five,
            LineTier::OpenFour => self.open_four,
            LineTier::ClosedFour => self.closed_four,
            LineTier::OpenThree => self.open_three,
            LineTier::OpenTwo => self.open_two,
            LineTier::None => NONE_SCORE,
        }
    }

    /// Lean further into attacking after a win.
    pub fn reward_win(&mut self) {
        self.attack_factor = (self.attack_factor + ATTACK_STEP).min(ATTACK_FACTOR_RANGE.1);
    }

    /// Defend harder and attack less after a defeat.
    pub fn penalize_loss(&mut self) {
        self.defense_factor = (self.defense_factor + DEFENSE_STEP).min(DEFENSE_FACTOR_RANGE.1);
        self.attack_factor = (self.attack_factor - ATTACK_STEP).max(ATTACK_FACTOR_RANGE.0);
    }

    /// Fields in persisted order.
    pub fn to_fields(&self) -> [f64; 7] {
        [
            self.five as f64,
            self.open_four as f64,
            self.closed_four as f64,
            self.open_three as f64,
            self.open_two as f64,
            self.attack_factor,
            self.defense_factor,
        ]
    }

    /// Rebuild from fields in persisted order.
    ///
    /// Factors outside their ranges are clamped back in. Fields must be finite.
    pub fn from_fields(fields: [f64; 7]) -> Self {
        Self {
            five: fields[0].round() as i64,
            open_four: fields[1].round() as i64,
            closed_four: fields[2].round() as i64,
            open_three: fields[3].round() as i64,
            open_two: fields[4].round() as i64,
            attack_factor: fields[5].clamp(ATTACK_FACTOR_RANGE.0, ATTACK_FACTOR_RANGE.1),
            defense_factor: fields[6].clamp(DEFENSE_FACTOR_RANGE.0, DEFENSE_FACTOR_RANGE.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        let w = HeuristicWeights::default();
        assert!(w.five > w.open_four);
        assert!(w.open_four > w.closed_four);
        assert!(w.closed_four > w.open_three);
        assert!(w.open_three > w.open_two);
        assert!(w.open_two > NONE_SCORE);
    }

    #[test]
    fn test_tier_score_lookup() {
        let w = HeuristicWeights::default();
        assert_eq!(w.tier_score(LineTier::Five), 100_000);
        assert_eq!(w.tier_score(LineTier::OpenFour), 10_000);
        assert_eq!(w.tier_score(LineTier::ClosedFour), 5_000);
        assert_eq!(w.tier_score(LineTier::OpenThree), 1_000);
        assert_eq!(w.tier_score(LineTier::OpenTwo), 50);
        assert_eq!(w.tier_score(LineTier::None), 1);
    }

    #[test]
    fn test_hundred_wins_saturate_attack() {
        let mut w = HeuristicWeights::default();
        for _ in 0..100 {
            w.reward_win();
        }
        assert_eq!(w.attack_factor, 2.0);
        assert_eq!(w.defense_factor, 1.0);
    }

    #[test]
    fn test_hundred_losses_saturate_defense() {
        let mut w = HeuristicWeights::default();
        for _ in 0..100 {
            w.penalize_loss();
        }
        assert_eq!(w.defense_factor, 2.5);
        assert_eq!(w.attack_factor, 0.5);
    }

    #[test]
    fn test_single_adjustments() {
        let mut w = HeuristicWeights::default();
        w.reward_win();
        assert!((w.attack_factor - 1.05).abs() < 1e-12);
        w.penalize_loss();
        assert!((w.attack_factor - 1.0).abs() < 1e-12);
        assert!((w.defense_factor - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_fields_order() {
        let w = HeuristicWeights {
            attack_factor: 1.25,
            defense_factor: 1.5,
            ..HeuristicWeights::default()
        };
        let fields = w.to_fields();
        assert_eq!(fields, [100_000.0, 10_000.0, 5_000.0, 1_000.0, 50.0, 1.25, 1.5]);
        assert_eq!(HeuristicWeights::from_fields(fields), w);
    }

    #[test]
    fn test_from_fields_clamps_factors() {
        let low = HeuristicWeights::from_fields([1.0, 1.0, 1.0, 1.0, 1.0, 0.1, 0.1]);
        assert_eq!(low.attack_factor, 0.5);
        assert_eq!(low.defense_factor, 1.0);
        let high = HeuristicWeights::from_fields([1.0, 1.0, 1.0, 1.0, 1.0, 9.0, 9.0]);
        assert_eq!(high.attack_factor, 2.0);
        assert_eq!(high.defense_factor, 2.5);
    }
}
