//! Random forest classifier
//!
//! Combines independently trained classification trees. Class probabilities
//! are the mean of each tree's normalized leaf distribution and the predicted
//! class is their arg-max, matching scikit-learn's soft-voting forest.

use serde::{Deserialize, Serialize};

use crate::{check_input, Classifier, DecisionTree, MLError, MLResult};

/// Ensemble of classification trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    /// Features each sample must have
    pub n_features: usize,
    /// Classes the trees vote over
    pub n_classes: usize,
    /// Individual trees
    pub trees: Vec<DecisionTree>,
}

impl RandomForestClassifier {
    /// Create and validate a forest
    pub fn new(n_features: usize, n_classes: usize, trees: Vec<DecisionTree>) -> MLResult<Self> {
        let forest = Self {
            n_features,
            n_classes,
            trees,
        };
        forest.validate()?;
        Ok(forest)
    }

    /// Check every tree against the declared shape
    pub fn validate(&self) -> MLResult<()> {
        if self.n_features == 0 || self.n_classes == 0 {
            return Err(MLError::InvalidModel("forest must declare features and classes"));
        }
        if self.trees.is_empty() {
            return Err(MLError::EmptyModel);
        }
        for tree in &self.trees {
            tree.validate(self.n_features, self.n_classes)?;
        }
        Ok(())
    }

    /// Get forest statistics
    pub fn stats(&self) -> ForestStats {
        ForestStats {
            num_trees: self.trees.len(),
            total_nodes: self.trees.iter().map(|t| t.node_count()).sum(),
            max_depth: self.trees.iter().map(|t| t.depth()).max().unwrap_or(0),
            num_classes: self.n_classes,
        }
    }
}

impl Classifier for RandomForestClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &[f64]) -> MLResult<Vec<f64>> {
        check_input(features, self.n_features)?;
        if self.trees.is_empty() {
            return Err(MLError::EmptyModel);
        }

        let mut totals = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let distribution = tree.predict_proba(features)?;
            if distribution.len() != self.n_classes {
                return Err(MLError::ShapeMismatch {
                    what: "tree class distribution",
                    expected: self.n_classes,
                    got: distribution.len(),
                });
            }
            for (total, p) in totals.iter_mut().zip(distribution) {
                *total += p;
            }
        }

        let n = self.trees.len() as f64;
        Ok(totals.into_iter().map(|t| t / n).collect())
    }
}

/// Forest statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestStats {
    /// Number of trees
    pub num_trees: usize,
    /// Total nodes across all trees
    pub total_nodes: usize,
    /// Maximum tree depth
    pub max_depth: usize,
    /// Number of classes
    pub num_classes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    fn forest() -> RandomForestClassifier {
        let by_rssi = DecisionTree::new(vec![
            Node::split(0, 0.0, 1, 2),
            Node::leaf([6.0, 2.0]),
            Node::leaf([1.0, 3.0]),
        ]);
        let by_room = DecisionTree::new(vec![
            Node::split(1, 0.5, 1, 2),
            Node::leaf([1.0, 0.0]),
            Node::leaf([0.0, 1.0]),
        ]);
        RandomForestClassifier::new(5, 2, vec![by_rssi, by_room]).unwrap()
    }

    #[test]
    fn probabilities_are_tree_average() {
        let f = forest();
        // tree 1: [0.75, 0.25], tree 2: [1.0, 0.0]
        let p = f.predict_proba(&[-1.0, 0.0, 12.0, 1.0, 0.0]).unwrap();
        assert_eq!(p, vec![0.875, 0.125]);
        assert_eq!(f.predict(&[-1.0, 0.0, 12.0, 1.0, 0.0]).unwrap(), 0);

        // tree 1: [0.25, 0.75], tree 2: [0.0, 1.0]
        let p = f.predict_proba(&[2.0, 2.0, 12.0, 3.0, 4.0]).unwrap();
        assert_eq!(p, vec![0.125, 0.875]);
        assert_eq!(f.predict(&[2.0, 2.0, 12.0, 3.0, 4.0]).unwrap(), 1);
    }

    #[test]
    fn wrong_feature_count_is_rejected() {
        assert_eq!(
            forest().predict_proba(&[0.0, 1.0]),
            Err(MLError::FeatureCountMismatch { expected: 5, got: 2 })
        );
    }

    #[test]
    fn non_finite_feature_is_rejected() {
        assert!(matches!(
            forest().predict_proba(&[f64::NAN, 1.0, 12.0, 1.0, 0.0]),
            Err(MLError::NonFiniteFeature { index: 0 })
        ));
    }

    #[test]
    fn empty_forest_is_invalid() {
        assert_eq!(RandomForestClassifier::new(5, 2, Vec::new()), Err(MLError::EmptyModel));
    }

    #[test]
    fn stats() {
        let stats = forest().stats();
        assert_eq!(stats.num_trees, 2);
        assert_eq!(stats.total_nodes, 6);
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.num_classes, 2);
    }
}
