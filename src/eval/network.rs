//! Two-layer perceptron used as a win-probability estimator
//!
//! Topology is fixed at 8 inputs, 12 hidden units and 1 output, sigmoid on
//! both layers, no bias units. Training is plain online backpropagation with
//! a constant learning rate.

use rand::Rng;

use super::features::{FeatureVector, FEATURE_COUNT};

pub const INPUT_SIZE: usize = FEATURE_COUNT;
pub const HIDDEN_SIZE: usize = 12;
pub const OUTPUT_SIZE: usize = 1;

/// Step size for every weight update.
pub const LEARNING_RATE: f64 = 0.05;

/// Half-width of the uniform initialization range.
const INIT_RANGE: f64 = 0.5;

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative expressed through the activation itself.
#[inline]
fn sigmoid_slope(activation: f64) -> f64 {
    activation * (1.0 - activation)
}

/// Layer outputs from one forward pass.
struct Activations {
    hidden: [f64; HIDDEN_SIZE],
    output: f64,
}

/// Fixed-shape network parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    /// Input -> hidden weights, indexed `[input][hidden]`
    w1: [[f64; HIDDEN_SIZE]; INPUT_SIZE],
    /// Hidden -> output weights, indexed `[hidden][output]`
    w2: [[f64; OUTPUT_SIZE]; HIDDEN_SIZE],
}

impl Network {
    /// Network with weights drawn uniformly from [-0.5, 0.5].
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut w1 = [[0.0; HIDDEN_SIZE]; INPUT_SIZE];
        let mut w2 = [[0.0; OUTPUT_SIZE]; HIDDEN_SIZE];
        for row in w1.iter_mut() {
            for w in row.iter_mut() {
                *w = rng.random_range(-INIT_RANGE..=INIT_RANGE);
            }
        }
        for row in w2.iter_mut() {
            for w in row.iter_mut() {
                *w = rng.random_range(-INIT_RANGE..=INIT_RANGE);
            }
        }
        Self { w1, w2 }
    }

    pub fn from_weights(
        w1: [[f64; HIDDEN_SIZE]; INPUT_SIZE],
        w2: [[f64; OUTPUT_SIZE]; HIDDEN_SIZE],
    ) -> Self {
        Self { w1, w2 }
    }

    pub fn input_weights(&self) -> &[[f64; HIDDEN_SIZE]; INPUT_SIZE] {
        &self.w1
    }

    pub fn output_weights(&self) -> &[[f64; OUTPUT_SIZE]; HIDDEN_SIZE] {
        &self.w2
    }

    fn activate(&self, inputs: &[f64; INPUT_SIZE]) -> Activations {
        let mut hidden = [0.0; HIDDEN_SIZE];
        for (j, h) in hidden.iter_mut().enumerate() {
            let sum: f64 = inputs.iter().zip(self.w1.iter()).map(|(x, row)| x * row[j]).sum();
            *h = sigmoid(sum);
        }
        let sum: f64 = hidden.iter().zip(self.w2.iter()).map(|(h, row)| h * row[0]).sum();
        Activations {
            hidden,
            output: sigmoid(sum),
        }
    }

    /// Estimated win probability (0..1) for a feature vector.
    pub fn forward(&self, features: &FeatureVector) -> f64 {
        self.activate(features.as_slice()).output
    }

    /// One backpropagation step towards `target`.
    ///
    /// Returns the output before the update.
    pub fn train(&mut self, features: &FeatureVector, target: f64) -> f64 {
        let inputs = features.as_slice();
        let act = self.activate(inputs);

        let output_error = (target - act.output) * sigmoid_slope(act.output);

        // Hidden errors use the output weights as they were before this step
        let mut hidden_error = [0.0; HIDDEN_SIZE];
        for (j, e) in hidden_error.iter_mut().enumerate() {
            *e = output_error * self.w2[j][0] * sigmoid_slope(act.hidden[j]);
        }

        for (row, h) in self.w2.iter_mut().zip(act.hidden.iter()) {
            row[0] += LEARNING_RATE * output_error * h;
        }
        for (row, x) in self.w1.iter_mut().zip(inputs.iter()) {
            for (w, e) in row.iter_mut().zip(hidden_error.iter()) {
                *w += LEARNING_RATE * e * x;
            }
        }

        act.output
    }
}
