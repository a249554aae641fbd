//! Artifact file loading
//!
//! Each loader reads one JSON file, parses it and validates the result before
//! handing it back. Every failure names the file it came from.
//!
//! Calibration files map device ids to their statistics; either moment may be
//! `null` when the device had too few samples:
//!
//! ```json
//! {
//!   "IMEI_IPHONE_X": { "mean": -75.0, "std": 8.0 },
//!   "IMEI_TAG_07":   { "mean": -81.2, "std": null }
//! }
//! ```
//!
//! Label decoder files list classes in index order:
//!
//! ```json
//! { "classes": ["Arredores", "Corredor", "Enfermaria", "Recepção"] }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use trackcare_core::{CalibrationStore, DeviceStats};
use trackcare_ml::{Classifier, LabelDecoder, ModelArtifact};

use crate::{ArtifactError, ArtifactResult};

#[derive(Deserialize)]
struct DecoderFile {
    classes: Vec<String>,
}

/// Load per-device calibration statistics
pub fn load_calibration(path: &Path) -> ArtifactResult<CalibrationStore> {
    let text = read(path)?;
    let store = parse_calibration(&text).map_err(|e| e.at(path))?;
    log::info!("loaded calibration for {} devices from {}", store.len(), path.display());
    Ok(store)
}

/// Load the class label decoder
pub fn load_label_decoder(path: &Path) -> ArtifactResult<LabelDecoder> {
    let text = read(path)?;
    let decoder = parse_label_decoder(&text).map_err(|e| e.at(path))?;
    log::info!("loaded {} class labels from {}", decoder.len(), path.display());
    Ok(decoder)
}

/// Load and validate the classifier
pub fn load_classifier(path: &Path) -> ArtifactResult<ModelArtifact> {
    let text = read(path)?;
    let model = parse_classifier(&text).map_err(|e| e.at(path))?;
    log::info!(
        "loaded {} classifier ({} features, {} classes) from {}",
        model.kind(),
        model.n_features(),
        model.n_classes(),
        path.display()
    );
    Ok(model)
}

/// Parse calibration JSON
pub fn parse_calibration(text: &str) -> ArtifactResult<CalibrationStore> {
    let devices: BTreeMap<String, DeviceStats> = serde_json::from_str(text).map_err(ArtifactError::parse)?;
    Ok(CalibrationStore::new(devices))
}

/// Parse and validate label decoder JSON
pub fn parse_label_decoder(text: &str) -> ArtifactResult<LabelDecoder> {
    let file: DecoderFile = serde_json::from_str(text).map_err(ArtifactError::parse)?;
    LabelDecoder::new(file.classes).map_err(ArtifactError::invalid)
}

/// Parse and validate classifier JSON
pub fn parse_classifier(text: &str) -> ArtifactResult<ModelArtifact> {
    let model: ModelArtifact = serde_json::from_str(text).map_err(ArtifactError::parse)?;
    model.validate().map_err(ArtifactError::invalid)?;
    Ok(model)
}

fn read(path: &Path) -> ArtifactResult<String> {
    fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackcare_core::CalibrationSource;
    use trackcare_ml::MLError;

    #[test]
    fn calibration_with_null_std() {
        let store = parse_calibration(
            r#"{"A": {"mean": -70.0, "std": 4.0}, "B": {"mean": -80.0, "std": null}}"#,
        )
        .unwrap();
        assert_eq!(store.len(), 2);

        let b = store.lookup("B");
        assert_eq!(b.source, CalibrationSource::Device);
        assert_eq!(b.std, 1.0);

        let unknown = store.lookup("C");
        assert_eq!(unknown.mean, -75.0);
        assert_eq!(unknown.std, 4.0);
    }

    #[test]
    fn decoder_requires_unique_classes() {
        let err = parse_label_decoder(r#"{"classes": ["Corredor", "Corredor"]}"#).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { source: MLError::InvalidModel(_), .. }));
    }

    #[test]
    fn classifier_is_validated() {
        let json = r#"{
            "kind": "random_forest",
            "n_features": 5,
            "n_classes": 2,
            "trees": [{"nodes": [
                {"type": "split", "feature": 7, "threshold": 0.0, "left": 1, "right": 2},
                {"type": "leaf", "value": [1.0, 0.0]},
                {"type": "leaf", "value": [0.0, 1.0]}
            ]}]
        }"#;
        assert!(matches!(parse_classifier(json), Err(ArtifactError::Invalid { .. })));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(parse_calibration("{not json"), Err(ArtifactError::Parse { .. })));
    }
}
