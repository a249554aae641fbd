//! Prediction response shapes

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorDescriptor, ServiceResult};

/// Outcome of one successful prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Decoded room label
    pub predicted_room: String,
    /// Highest class probability, four decimals
    pub confidence: f64,
    /// Device had no calibration of its own
    pub used_fallback_calibration: bool,
    /// Normalized RSSI differs from the raw reading
    pub normalization_applied: bool,
    /// Version of the model that answered
    pub model_version: String,
}

/// One slot of a batch response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    /// Record was classified
    Prediction(PredictionResult),
    /// Record failed
    Error(ErrorDescriptor),
}

impl BatchEntry {
    /// True for a failed slot
    pub fn is_error(&self) -> bool {
        matches!(self, BatchEntry::Error(_))
    }

    /// The prediction, if the slot succeeded
    pub fn prediction(&self) -> Option<&PredictionResult> {
        match self {
            BatchEntry::Prediction(p) => Some(p),
            BatchEntry::Error(_) => None,
        }
    }
}

impl From<ServiceResult<PredictionResult>> for BatchEntry {
    fn from(result: ServiceResult<PredictionResult>) -> Self {
        match result {
            Ok(prediction) => BatchEntry::Prediction(prediction),
            Err(err) => BatchEntry::Error(err.descriptor()),
        }
    }
}

/// Response to a batch request, one entry per input record in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Per-record entries
    pub predictions: Vec<BatchEntry>,
    /// Number of entries
    pub count: usize,
}

impl BatchOutcome {
    /// Wrap entries, counting them
    pub fn new(predictions: Vec<BatchEntry>) -> Self {
        let count = predictions.len();
        Self { predictions, count }
    }

    /// Number of failed entries
    pub fn error_count(&self) -> usize {
        self.predictions.iter().filter(|e| e.is_error()).count()
    }
}
