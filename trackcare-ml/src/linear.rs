//! Logistic regression classifier
//!
//! Multinomial models score each class as `w_k · x + b_k` and apply a
//! softmax. A binary model exported with a single coefficient row scores the
//! positive class with a sigmoid, as scikit-learn does.

use serde::{Deserialize, Serialize};

use crate::{check_input, Classifier, MLError, MLResult};

/// Linear model with softmax (or sigmoid) output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Features each sample must have
    pub n_features: usize,
    /// Number of classes
    pub n_classes: usize,
    /// One weight row per class (a single row for a binary model)
    pub coefficients: Vec<Vec<f64>>,
    /// One bias per coefficient row
    pub intercepts: Vec<f64>,
}

impl LogisticRegression {
    /// Create and validate a model
    pub fn new(
        n_features: usize,
        n_classes: usize,
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> MLResult<Self> {
        let model = Self {
            n_features,
            n_classes,
            coefficients,
            intercepts,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check coefficient and intercept shapes
    pub fn validate(&self) -> MLResult<()> {
        if self.n_features == 0 || self.n_classes < 2 {
            return Err(MLError::InvalidModel(
                "logistic regression needs features and at least two classes",
            ));
        }

        let rows = if self.is_binary() { 1 } else { self.n_classes };
        if self.coefficients.len() != rows {
            return Err(MLError::ShapeMismatch {
                what: "coefficient rows",
                expected: rows,
                got: self.coefficients.len(),
            });
        }
        if self.intercepts.len() != rows {
            return Err(MLError::ShapeMismatch {
                what: "intercepts",
                expected: rows,
                got: self.intercepts.len(),
            });
        }
        for row in &self.coefficients {
            if row.len() != self.n_features {
                return Err(MLError::ShapeMismatch {
                    what: "coefficient columns",
                    expected: self.n_features,
                    got: row.len(),
                });
            }
        }
        let all_finite = self
            .coefficients
            .iter()
            .flatten()
            .chain(&self.intercepts)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(MLError::InvalidModel("non-finite coefficient or intercept"));
        }

        Ok(())
    }

    fn is_binary(&self) -> bool {
        self.n_classes == 2 && self.coefficients.len() == 1
    }

    fn decision_function(&self, features: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &[f64]) -> MLResult<Vec<f64>> {
        check_input(features, self.n_features)?;
        let scores = self.decision_function(features);

        if self.is_binary() {
            let z = scores.first().copied().ok_or(MLError::EmptyModel)?;
            let p = sigmoid(z);
            return Ok(vec![1.0 - p, p]);
        }

        Ok(softmax(&scores))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Numerically stable softmax
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
