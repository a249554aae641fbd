//! Prediction errors and their client-facing descriptors

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trackcare_core::ValidationError;
use trackcare_ml::MLError;

/// Result type for prediction requests
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Why a prediction request failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// Record rejected before feature building
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),

    /// No model context is loaded
    #[error("model not loaded")]
    ModelNotReady,

    /// Classifier failed on a valid record
    #[error("prediction failed: {0}")]
    Prediction(#[source] MLError),
}

impl ServiceError {
    /// Which side caused the failure
    pub fn fault(&self) -> Fault {
        match self {
            ServiceError::InvalidInput(_) => Fault::Client,
            ServiceError::ModelNotReady | ServiceError::Prediction(_) => Fault::Server,
        }
    }

    /// Serializable form of this error
    pub fn descriptor(&self) -> ErrorDescriptor {
        ErrorDescriptor {
            error: self.to_string(),
            fault: self.fault(),
        }
    }
}

impl From<MLError> for ServiceError {
    fn from(err: MLError) -> Self {
        match err {
            MLError::ModelNotReady => ServiceError::ModelNotReady,
            other => ServiceError::Prediction(other),
        }
    }
}

/// Side responsible for a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fault {
    /// Bad input; retrying unchanged fails again
    Client,
    /// Service-side failure
    Server,
}

impl Fault {
    /// HTTP status a shell should answer with
    pub fn status_code(self) -> u16 {
        match self {
            Fault::Client => 400,
            Fault::Server => 500,
        }
    }
}

/// Error entry in a batch response or an error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    /// Human-readable message
    pub error: String,
    /// Responsible side
    pub fault: Fault,
}
