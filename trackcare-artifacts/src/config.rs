//! Artifact locations
//!
//! Every artifact lives under one model directory with a fixed file name.
//! The defaults match the layout the training notebook writes:
//!
//! ```text
//! models/
//! ├── best_model.json      classifier
//! ├── label_encoder.json   class labels
//! └── imei_stats.json      per-device RSSI statistics
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default model directory
pub const DEFAULT_MODEL_DIR: &str = "models";
/// Default classifier file name
pub const DEFAULT_CLASSIFIER_FILE: &str = "best_model.json";
/// Default label decoder file name
pub const DEFAULT_LABEL_DECODER_FILE: &str = "label_encoder.json";
/// Default calibration file name
pub const DEFAULT_CALIBRATION_FILE: &str = "imei_stats.json";
/// Version reported with every prediction unless overridden
pub const DEFAULT_MODEL_VERSION: &str = "1.0.0";

/// Where to find the model artifacts and how to label them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Directory holding all artifact files
    pub model_dir: PathBuf,
    /// Classifier file, relative to `model_dir`
    pub classifier_file: String,
    /// Label decoder file, relative to `model_dir`
    pub label_decoder_file: String,
    /// Calibration file, relative to `model_dir`
    pub calibration_file: String,
    /// Version string reported with predictions
    pub model_version: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            classifier_file: DEFAULT_CLASSIFIER_FILE.to_string(),
            label_decoder_file: DEFAULT_LABEL_DECODER_FILE.to_string(),
            calibration_file: DEFAULT_CALIBRATION_FILE.to_string(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
        }
    }
}

impl ArtifactConfig {
    /// Default file names under `model_dir`
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Self::default()
        }
    }

    /// Set classifier file name
    pub fn with_classifier_file(mut self, name: impl Into<String>) -> Self {
        self.classifier_file = name.into();
        self
    }

    /// Set label decoder file name
    pub fn with_label_decoder_file(mut self, name: impl Into<String>) -> Self {
        self.label_decoder_file = name.into();
        self
    }

    /// Set calibration file name
    pub fn with_calibration_file(mut self, name: impl Into<String>) -> Self {
        self.calibration_file = name.into();
        self
    }

    /// Set reported model version
    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = version.into();
        self
    }

    /// Full classifier path
    pub fn classifier_path(&self) -> PathBuf {
        self.model_dir.join(&self.classifier_file)
    }

    /// Full label decoder path
    pub fn label_decoder_path(&self) -> PathBuf {
        self.model_dir.join(&self.label_decoder_file)
    }

    /// Full calibration path
    pub fn calibration_path(&self) -> PathBuf {
        self.model_dir.join(&self.calibration_file)
    }

    /// Model directory
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }
}
