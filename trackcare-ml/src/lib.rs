//! Room Classifiers for Track&Care Inference
//!
//! ## Overview
//!
//! This crate evaluates the trained room classifier natively. The model is
//! fitted offline and exported to JSON; nothing here trains. Two families are
//! supported:
//!
//! - [`RandomForestClassifier`]: soft-voting ensemble of [`DecisionTree`]s
//!   stored as flat node arrays
//! - [`LogisticRegression`]: multinomial softmax, or a sigmoid for binary
//!   models exported with a single coefficient row
//!
//! Both implement [`Classifier`], the seam the prediction path talks to. The
//! [`ClassifierAdapter`] pairs a classifier with its [`LabelDecoder`] and
//! turns a feature vector into a decoded room and a confidence.
//!
//! ## Tree Evaluation
//!
//! Splits follow the scikit-learn convention:
//!
//! ```text
//! features[feature] <= threshold  ->  left
//! otherwise                       ->  right
//! ```
//!
//! Leaves hold per-class weights (sample counts or fractions); a tree's class
//! distribution is its leaf normalized to sum to one, and the forest averages
//! those distributions.
//!
//! ## Example
//!
//! ```rust
//! use trackcare_ml::{Classifier, DecisionTree, Node, RandomForestClassifier};
//!
//! let tree = DecisionTree::new(vec![
//!     Node::split(0, -0.5, 1, 2),
//!     Node::leaf([8.0, 2.0]),
//!     Node::leaf([1.0, 9.0]),
//! ]);
//! let forest = RandomForestClassifier::new(5, 2, vec![tree]).unwrap();
//!
//! let p = forest.predict_proba(&[0.405, 0.0, 12.0, 1.0, 0.0]).unwrap();
//! assert_eq!(p, vec![0.1, 0.9]);
//! assert_eq!(forest.predict(&[0.405, 0.0, 12.0, 1.0, 0.0]).unwrap(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

use core::fmt::Debug;

use thiserror_no_std::Error;

pub mod adapter;
pub mod decoder;
pub mod forest;
pub mod linear;
pub mod model;
pub mod node;
pub mod scoring;
pub mod tree;

pub use adapter::{ClassifierAdapter, RoomPrediction};
pub use decoder::LabelDecoder;
pub use forest::{ForestStats, RandomForestClassifier};
pub use linear::LogisticRegression;
pub use model::ModelArtifact;
pub use node::Node;
pub use scoring::{round_confidence, ClassProbabilities};
pub use tree::DecisionTree;

/// Result type for model operations
pub type MLResult<T> = Result<T, MLError>;

/// Model loading and evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MLError {
    /// Input has the wrong number of features
    #[error("expected {expected} features, got {got}")]
    FeatureCountMismatch {
        /// Features the model was fitted on
        expected: usize,
        /// Features supplied
        got: usize,
    },

    /// Input feature is NaN or infinite
    #[error("feature {index} is not finite")]
    NonFiniteFeature {
        /// Position of the feature
        index: usize,
    },

    /// A split refers to a feature the input does not have
    #[error("split on missing feature {index}")]
    InvalidFeature {
        /// Feature index named by the split
        index: usize,
    },

    /// Model structure is unusable
    #[error("invalid model: {0}")]
    InvalidModel(&'static str),

    /// A model component has the wrong size
    #[error("{what}: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Component being checked
        what: &'static str,
        /// Expected size
        expected: usize,
        /// Actual size
        got: usize,
    },

    /// Model has nothing to evaluate
    #[error("model contains no estimators")]
    EmptyModel,

    /// Predicted class has no label
    #[error("class index {index} out of range for {classes} classes")]
    ClassIndexOutOfRange {
        /// Predicted index
        index: usize,
        /// Classes the decoder knows
        classes: usize,
    },

    /// Probability vector is malformed
    #[error("invalid probabilities: {0}")]
    InvalidProbabilities(&'static str),

    /// No model is loaded
    #[error("model not loaded")]
    ModelNotReady,
}

/// A fitted classifier over fixed-length feature vectors
pub trait Classifier: Send + Sync + Debug {
    /// Features each input must have
    fn n_features(&self) -> usize;

    /// Classes the model scores
    fn n_classes(&self) -> usize;

    /// Per-class probabilities, summing to one
    fn predict_proba(&self, features: &[f64]) -> MLResult<Vec<f64>>;

    /// Most probable class; the lowest index wins ties
    fn predict(&self, features: &[f64]) -> MLResult<usize> {
        Ok(ClassProbabilities::new(self.predict_proba(features)?)?.argmax())
    }
}

/// Reject inputs of the wrong width or with non-finite values
pub fn check_input(features: &[f64], n_features: usize) -> MLResult<()> {
    if features.len() != n_features {
        return Err(MLError::FeatureCountMismatch {
            expected: n_features,
            got: features.len(),
        });
    }
    match features.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(MLError::NonFiniteFeature { index }),
        None => Ok(()),
    }
}
