//! Model Artifacts for Track&Care Inference
//!
//! ## Overview
//!
//! Predictions depend on three artifacts produced offline by training:
//!
//! | Artifact        | Type                 | Default file          |
//! |-----------------|----------------------|-----------------------|
//! | Classifier      | [`ModelArtifact`]    | `best_model.json`     |
//! | Label decoder   | [`LabelDecoder`]     | `label_encoder.json`  |
//! | Calibration     | [`CalibrationStore`] | `imei_stats.json`     |
//!
//! [`ModelContext::load`] reads all three from the directory named by an
//! [`ArtifactConfig`], validates them against each other and returns the
//! immutable context the prediction service serves from. A service must not
//! start without one, so every load failure is reported as an
//! [`ArtifactError`] rather than degraded.
//!
//! ```rust,no_run
//! use trackcare_artifacts::{ArtifactConfig, ModelContext};
//!
//! let context = ModelContext::load(&ArtifactConfig::new("/srv/trackcare/models"))?;
//! println!("serving model {}", context.model_version());
//! # Ok::<(), trackcare_artifacts::ArtifactError>(())
//! ```
//!
//! [`ModelArtifact`]: trackcare_ml::ModelArtifact
//! [`LabelDecoder`]: trackcare_ml::LabelDecoder
//! [`CalibrationStore`]: trackcare_core::CalibrationStore

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::path::Path;

use thiserror_no_std::Error;
use trackcare_ml::MLError;

pub mod config;
pub mod context;
pub mod loader;

pub use config::ArtifactConfig;
pub use context::ModelContext;

/// Result type for artifact loading
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Artifact loading errors
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File involved
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON for its artifact type
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File involved, empty when parsing from memory
        path: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Artifact parsed but is structurally unusable
    #[error("invalid artifact {path}: {source}")]
    Invalid {
        /// File involved, empty when parsing from memory
        path: String,
        /// Validation failure
        #[source]
        source: MLError,
    },

    /// Classifier was fitted on a different feature layout
    #[error("classifier expects {got} features but the pipeline builds {expected}")]
    FeatureCountMismatch {
        /// Features the pipeline produces
        expected: usize,
        /// Features the classifier declares
        got: usize,
    },

    /// Classifier and label decoder disagree on the number of classes
    #[error("classifier has {model} classes but label decoder has {decoder}")]
    ClassCountMismatch {
        /// Classes the classifier scores
        model: usize,
        /// Labels the decoder holds
        decoder: usize,
    },
}

impl ArtifactError {
    pub(crate) fn parse(source: serde_json::Error) -> Self {
        ArtifactError::Parse {
            path: String::new(),
            source,
        }
    }

    pub(crate) fn invalid(source: MLError) -> Self {
        ArtifactError::Invalid {
            path: String::new(),
            source,
        }
    }

    /// Attach the file an in-memory error came from
    pub(crate) fn at(self, file: &Path) -> Self {
        let file = file.display().to_string();
        match self {
            ArtifactError::Parse { source, .. } => ArtifactError::Parse { path: file, source },
            ArtifactError::Invalid { source, .. } => ArtifactError::Invalid { path: file, source },
            other => other,
        }
    }
}
