//! Class probability handling
//!
//! Wraps a classifier's probability output, checks it is usable, and derives
//! the predicted class and the reported confidence from it.

use trackcare_core::constants::CONFIDENCE_DECIMALS;

use crate::{MLError, MLResult};

/// Tolerance on the probability sum before output is considered malformed
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Validated per-class probabilities
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbabilities {
    values: Vec<f64>,
}

impl ClassProbabilities {
    /// Validate raw classifier output
    pub fn new(values: Vec<f64>) -> MLResult<Self> {
        if values.is_empty() {
            return Err(MLError::InvalidProbabilities("no classes"));
        }
        if values.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(MLError::InvalidProbabilities("non-finite or negative probability"));
        }
        let sum: f64 = values.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(MLError::InvalidProbabilities("probabilities do not sum to 1"));
        }

        Ok(Self { values })
    }

    /// Index of the most probable class; the first one on ties
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (index, p) in self.values.iter().enumerate() {
            if *p > self.values[best] {
                best = index;
            }
        }
        best
    }

    /// Highest class probability
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Highest probability rounded to the reported precision
    pub fn confidence(&self) -> f64 {
        round_confidence(self.max())
    }

    /// Probability of one class
    pub fn get(&self, class: usize) -> Option<f64> {
        self.values.get(class).copied()
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated value
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw probabilities
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Round to [`CONFIDENCE_DECIMALS`] places and keep the result in `[0, 1]`
pub fn round_confidence(value: f64) -> f64 {
    let scale = 10f64.powi(CONFIDENCE_DECIMALS);
    ((value * scale).round() / scale).clamp(0.0, 1.0)
}
