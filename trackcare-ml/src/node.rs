//! Decision tree node representation
//!
//! Trees are stored as flat arrays of nodes addressed by index, the layout
//! scikit-learn uses internally, so an exported tree maps onto this type
//! one-to-one.

use serde::{Deserialize, Serialize};

use crate::{MLError, MLResult};

/// Node in a classification tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Internal node with split condition
    Split {
        /// Feature index to split on
        feature: usize,
        /// Samples with `x[feature] <= threshold` go left
        threshold: f64,
        /// Left child index
        left: usize,
        /// Right child index
        right: usize,
    },
    /// Leaf holding per-class training weights
    Leaf {
        /// Weight (sample count or fraction) per class
        value: Vec<f64>,
    },
}

impl Node {
    /// Create an internal node
    pub fn split(feature: usize, threshold: f64, left: usize, right: usize) -> Self {
        Node::Split {
            feature,
            threshold,
            left,
            right,
        }
    }

    /// Create a leaf node
    pub fn leaf(value: impl Into<Vec<f64>>) -> Self {
        Node::Leaf { value: value.into() }
    }

    /// Check if node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Child index to visit next for `features`
    pub fn traverse(&self, features: &[f64]) -> MLResult<usize> {
        match self {
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let value = features
                    .get(*feature)
                    .copied()
                    .ok_or(MLError::InvalidFeature { index: *feature })?;

                if value <= *threshold {
                    Ok(*left)
                } else {
                    Ok(*right)
                }
            }
            Node::Leaf { .. } => Err(MLError::InvalidModel("cannot traverse from a leaf node")),
        }
    }

    /// Class distribution of a leaf, normalized to sum to 1
    pub fn class_distribution(&self) -> MLResult<Vec<f64>> {
        match self {
            Node::Leaf { value } => {
                let total: f64 = value.iter().sum();
                if !(total > 0.0) || !total.is_finite() {
                    return Err(MLError::InvalidModel("leaf weights must sum to a positive value"));
                }
                Ok(value.iter().map(|w| w / total).collect())
            }
            Node::Split { .. } => Err(MLError::InvalidModel("split node has no class distribution")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traverse_goes_left_on_equal() {
        let node = Node::split(0, -70.0, 1, 2);
        assert!(!node.is_leaf());
        assert_eq!(node.traverse(&[-70.0]).unwrap(), 1);
        assert_eq!(node.traverse(&[-80.0]).unwrap(), 1);
        assert_eq!(node.traverse(&[-69.9]).unwrap(), 2);
    }

    #[test]
    fn traverse_missing_feature() {
        let node = Node::split(3, 0.0, 1, 2);
        assert_eq!(node.traverse(&[1.0]), Err(MLError::InvalidFeature { index: 3 }));
    }

    #[test]
    fn leaf_distribution_is_normalized() {
        let leaf = Node::leaf([3.0, 1.0, 0.0, 0.0]);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.class_distribution().unwrap(), vec![0.75, 0.25, 0.0, 0.0]);
        assert!(leaf.traverse(&[0.0]).is_err());
    }

    #[test]
    fn empty_leaf_is_invalid() {
        assert!(Node::leaf([0.0, 0.0]).class_distribution().is_err());
    }

    #[test]
    fn serde_layout() {
        let json = r#"[
            {"type": "split", "feature": 0, "threshold": 0.5, "left": 1, "right": 2},
            {"type": "leaf", "value": [1.0, 0.0]}
        ]"#;
        let nodes: Vec<Node> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes[0], Node::split(0, 0.5, 1, 2));
        assert_eq!(nodes[1], Node::leaf([1.0, 0.0]));
    }
}
