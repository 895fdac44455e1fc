//! Feature extraction for the trainable evaluator
//!
//! A candidate cell is described by the line shapes it would create for the
//! mover and, separately, for the opponent if the opponent played there.

use crate::board::{Board, Pos, Stone};
use crate::rules::{classify_all, LineTier};

/// Number of input features.
pub const FEATURE_COUNT: usize = 8;

/// Slot layout: own shapes in 0..4, opponent shapes in 4..8.
pub mod slot {
    pub const OWN_FOUR_OR_FIVE: usize = 0;
    pub const OWN_CLOSED_FOUR: usize = 1;
    pub const OWN_OPEN_THREE: usize = 2;
    pub const OWN_OPEN_TWO: usize = 3;
    pub const ENEMY_FOUR_OR_FIVE: usize = 4;
    pub const ENEMY_CLOSED_FOUR: usize = 5;
    pub const ENEMY_OPEN_THREE: usize = 6;
    pub const ENEMY_OPEN_TWO: usize = 7;
}

/// Per-axis shape counts for one candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    #[inline]
    pub fn as_slice(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        FeatureVector(values)
    }
}

/// Slot offset within a side's block for a tier, if it is counted at all.
#[inline]
fn tier_slot(tier: LineTier) -> Option<usize> {
    match tier {
        LineTier::Five | LineTier::OpenFour => Some(0),
        LineTier::ClosedFour => Some(1),
        LineTier::OpenThree => Some(2),
        LineTier::OpenTwo => Some(3),
        LineTier::None => None,
    }
}

/// Tally the shapes `color` would make at `pos` into `features[base..base + 4]`.
fn tally(board: &mut Board, pos: Pos, color: Stone, base: usize, features: &mut [f64; FEATURE_COUNT]) {
    let probe = board.probe(pos, color);
    for tier in classify_all(&probe, pos, color) {
        if let Some(offset) = tier_slot(tier) {
            features[base + offset] += 1.0;
        }
    }
}

/// Build the feature vector for `color` playing the empty cell `pos`.
///
/// The board is probed once per side and is unchanged on return.
pub fn extract_features(board: &mut Board, pos: Pos, color: Stone) -> FeatureVector {
    let mut features = [0.0; FEATURE_COUNT];
    tally(board, pos, color, slot::OWN_FOUR_OR_FIVE, &mut features);
    tally(board, pos, color.opponent(), slot::ENEMY_FOUR_OR_FIVE, &mut features);
    FeatureVector(features)
}
