//! Immutable model context
//!
//! Everything a prediction reads besides the request itself. Built once at
//! startup, never mutated, shared between requests behind an `Arc`.

use trackcare_core::constants::FEATURE_COUNT;
use trackcare_core::CalibrationStore;
use trackcare_ml::{Classifier, ClassifierAdapter, LabelDecoder, ModelArtifact};

use crate::loader::{load_calibration, load_classifier, load_label_decoder};
use crate::{ArtifactConfig, ArtifactError, ArtifactResult};

/// Loaded artifacts for serving predictions
#[derive(Debug)]
pub struct ModelContext {
    calibration: CalibrationStore,
    classifier: ClassifierAdapter,
    model_version: String,
}

impl ModelContext {
    /// Assemble a context from already loaded parts.
    ///
    /// The model must consume exactly the features the pipeline builds and
    /// score as many classes as the decoder labels.
    pub fn new(
        calibration: CalibrationStore,
        model: ModelArtifact,
        decoder: LabelDecoder,
        model_version: impl Into<String>,
    ) -> ArtifactResult<Self> {
        if model.n_features() != FEATURE_COUNT {
            return Err(ArtifactError::FeatureCountMismatch {
                expected: FEATURE_COUNT,
                got: model.n_features(),
            });
        }
        if model.n_classes() != decoder.len() {
            return Err(ArtifactError::ClassCountMismatch {
                model: model.n_classes(),
                decoder: decoder.len(),
            });
        }
        let classifier = ClassifierAdapter::new(model, decoder).map_err(ArtifactError::invalid)?;

        Ok(Self {
            calibration,
            classifier,
            model_version: model_version.into(),
        })
    }

    /// Load every artifact named by `config`; any failure is fatal
    pub fn load(config: &ArtifactConfig) -> ArtifactResult<Self> {
        log::info!("loading model artifacts from {}", config.model_dir().display());

        let model = load_classifier(&config.classifier_path())?;
        let decoder = load_label_decoder(&config.label_decoder_path())?;
        let calibration = load_calibration(&config.calibration_path())?;

        let context = Self::new(calibration, model, decoder, config.model_version.clone())?;
        log::info!("model context ready, version {}", context.model_version);
        Ok(context)
    }

    /// Per-device calibration statistics
    pub fn calibration(&self) -> &CalibrationStore {
        &self.calibration
    }

    /// Classifier and label decoder
    pub fn classifier(&self) -> &ClassifierAdapter {
        &self.classifier
    }

    /// Version reported with predictions
    pub fn model_version(&self) -> &str {
        &self.model_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackcare_core::DeviceStats;
    use trackcare_ml::{DecisionTree, Node, RandomForestClassifier};

    fn model(n_classes: usize) -> ModelArtifact {
        model_with_features(5, n_classes)
    }

    fn model_with_features(n_features: usize, n_classes: usize) -> ModelArtifact {
        let tree = DecisionTree::new(vec![Node::leaf(vec![1.0; n_classes])]);
        RandomForestClassifier::new(n_features, n_classes, vec![tree]).unwrap().into()
    }

    fn decoder() -> LabelDecoder {
        LabelDecoder::new(vec!["Corredor".into(), "Enfermaria".into()]).unwrap()
    }

    #[test]
    fn assembles_context() {
        let calibration: CalibrationStore =
            [("A".to_string(), DeviceStats::new(-70.0, 5.0))].into_iter().collect();
        let context = ModelContext::new(calibration, model(2), decoder(), "1.0.0").unwrap();
        assert!(context.classifier().is_ready());
        assert!(context.calibration().contains("A"));
        assert_eq!(context.model_version(), "1.0.0");
    }

    #[test]
    fn class_count_must_match() {
        let err = ModelContext::new(CalibrationStore::default(), model(3), decoder(), "1.0.0").unwrap_err();
        assert!(matches!(err, ArtifactError::ClassCountMismatch { model: 3, decoder: 2 }));
    }

    #[test]
    fn feature_count_must_match_pipeline() {
        let err = ModelContext::new(CalibrationStore::default(), model_with_features(3, 2), decoder(), "1.0.0")
            .unwrap_err();
        assert!(matches!(err, ArtifactError::FeatureCountMismatch { expected: 5, got: 3 }));
    }
}
