//! Label decoding
//!
//! The classifier predicts a class index; the decoder maps it back to the room
//! name it was fitted on. The class order is whatever the training label
//! encoder produced (alphabetical for scikit-learn), not the feature
//! vocabulary order.

use serde::{Deserialize, Serialize};

use crate::{MLError, MLResult};

/// Class index to room label mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    /// Create a decoder; labels must be non-empty and unique
    pub fn new(classes: Vec<String>) -> MLResult<Self> {
        if classes.is_empty() {
            return Err(MLError::InvalidModel("label decoder has no classes"));
        }
        for (i, label) in classes.iter().enumerate() {
            if classes[..i].contains(label) {
                return Err(MLError::InvalidModel("label decoder has duplicate classes"));
            }
        }
        Ok(Self { classes })
    }

    /// Label for a class index
    pub fn decode(&self, index: usize) -> MLResult<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(MLError::ClassIndexOutOfRange {
                index,
                classes: self.classes.len(),
            })
    }

    /// Class index for a label
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True when there are no classes; never the case after [`LabelDecoder::new`]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Labels in class order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
