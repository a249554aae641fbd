//! Classification tree
//!
//! A tree is evaluated by walking from the root (index 0) to a leaf. Trees are
//! validated once at load time so evaluation can rely on every child index
//! pointing forward into the node array, which also rules out cycles.

use serde::{Deserialize, Serialize};

use crate::{MLError, MLResult, Node};

/// Array-encoded classification tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Tree nodes, root first
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    /// Create a tree from its nodes
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Check structure against the model's feature and class counts
    pub fn validate(&self, n_features: usize, n_classes: usize) -> MLResult<()> {
        if self.nodes.is_empty() {
            return Err(MLError::InvalidModel("tree has no nodes"));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(MLError::InvalidFeature { index: *feature });
                    }
                    if threshold.is_nan() {
                        return Err(MLError::InvalidModel("split threshold is NaN"));
                    }
                    // Children must point forward, which also rules out cycles
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(MLError::InvalidModel("split child index out of range"));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(MLError::ShapeMismatch {
                            what: "leaf class weights",
                            expected: n_classes,
                            got: value.len(),
                        });
                    }
                    if value.iter().any(|w| *w < 0.0 || !w.is_finite()) {
                        return Err(MLError::InvalidModel("leaf weights must be finite and non-negative"));
                    }
                    node.class_distribution()?;
                }
            }
        }

        Ok(())
    }

    /// Leaf reached by `features`
    pub fn leaf(&self, features: &[f64]) -> MLResult<&Node> {
        let mut current = 0;

        // A validated tree reaches a leaf in fewer steps than it has nodes
        for _ in 0..self.nodes.len() {
            let node = self
                .nodes
                .get(current)
                .ok_or(MLError::InvalidModel("node index out of range"))?;

            if node.is_leaf() {
                return Ok(node);
            }
            current = node.traverse(features)?;
        }

        Err(MLError::InvalidModel("tree traversal did not terminate"))
    }

    /// Class probabilities for `features`
    pub fn predict_proba(&self, features: &[f64]) -> MLResult<Vec<f64>> {
        self.leaf(features)?.class_distribution()
    }

    /// Get the number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Longest root-to-leaf path, in edges
    pub fn depth(&self) -> usize {
        let mut depths = vec![0usize; self.nodes.len()];
        let mut max_depth = 0;

        for (index, node) in self.nodes.iter().enumerate() {
            let depth = depths.get(index).copied().unwrap_or(0);
            max_depth = max_depth.max(depth);
            if let Node::Split { left, right, .. } = node {
                for child in [*left, *right] {
                    if let Some(slot) = depths.get_mut(child) {
                        *slot = depth + 1;
                    }
                }
            }
        }

        max_depth
    }
}
