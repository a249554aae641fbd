//! Classifier adapter
//!
//! Bridges a [`FeatureVector`] to a loaded classifier and label decoder and
//! returns the decoded room with its confidence. An adapter built with
//! [`ClassifierAdapter::not_loaded`] stands for a process whose artifacts are
//! not available and fails every call with [`MLError::ModelNotReady`].

use std::fmt;

use trackcare_core::FeatureVector;

use crate::{Classifier, ClassProbabilities, LabelDecoder, MLError, MLResult};

/// Decoded classifier output for one feature vector
#[derive(Debug, Clone, PartialEq)]
pub struct RoomPrediction {
    /// Decoded room label
    pub label: String,
    /// Highest class probability, rounded to four decimals
    pub confidence: f64,
    /// Predicted class index
    pub class_index: usize,
}

/// Loaded classifier plus its label decoder
pub struct ClassifierAdapter {
    classifier: Option<Box<dyn Classifier>>,
    decoder: Option<LabelDecoder>,
}

impl ClassifierAdapter {
    /// Pair a classifier with its decoder; class counts must agree
    pub fn new<C>(classifier: C, decoder: LabelDecoder) -> MLResult<Self>
    where
        C: Classifier + 'static,
    {
        if classifier.n_classes() != decoder.len() {
            return Err(MLError::ShapeMismatch {
                what: "decoder classes",
                expected: classifier.n_classes(),
                got: decoder.len(),
            });
        }

        Ok(Self {
            classifier: Some(Box::new(classifier)),
            decoder: Some(decoder),
        })
    }

    /// Adapter with nothing loaded
    pub fn not_loaded() -> Self {
        Self {
            classifier: None,
            decoder: None,
        }
    }

    /// True when both the classifier and the decoder are loaded
    pub fn is_ready(&self) -> bool {
        self.classifier.is_some() && self.decoder.is_some()
    }

    /// The loaded label decoder
    pub fn decoder(&self) -> Option<&LabelDecoder> {
        self.decoder.as_ref()
    }

    /// Classify one feature vector.
    ///
    /// The label is the classifier's predicted class; the confidence is the
    /// highest class probability.
    pub fn predict(&self, vector: &FeatureVector) -> MLResult<RoomPrediction> {
        let (classifier, decoder) = match (&self.classifier, &self.decoder) {
            (Some(c), Some(d)) => (c, d),
            _ => return Err(MLError::ModelNotReady),
        };

        let features = vector.to_array();
        let class_index = classifier.predict(&features)?;
        let probabilities = ClassProbabilities::new(classifier.predict_proba(&features)?).map_err(|err| {
            log::debug!("rejected classifier output: {err}");
            err
        })?;
        if class_index != probabilities.argmax() {
            log::debug!(
                "predicted class {class_index} is not the most probable class {}",
                probabilities.argmax()
            );
        }
        let label = decoder.decode(class_index)?.to_string();

        Ok(RoomPrediction {
            label,
            confidence: probabilities.confidence(),
            class_index,
        })
    }
}

impl Default for ClassifierAdapter {
    fn default() -> Self {
        Self::not_loaded()
    }
}

impl fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("classifier", &self.classifier)
            .field("classes", &self.decoder.as_ref().map(|d| d.classes()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecisionTree, Node, RandomForestClassifier};
    use trackcare_core::{CalibrationStore, DeviceStats, FeatureBuilder, TelemetryRecord};

    fn decoder() -> LabelDecoder {
        LabelDecoder::new(vec!["Corredor".into(), "Enfermaria".into()]).unwrap()
    }

    fn adapter() -> ClassifierAdapter {
        // Ward readings (room code 0) are predicted in the ward
        let tree = DecisionTree::new(vec![
            Node::split(1, 0.5, 1, 2),
            Node::leaf([1.0, 2.0]),
            Node::leaf([3.0, 0.0]),
        ]);
        let forest = RandomForestClassifier::new(5, 2, vec![tree]).unwrap();
        ClassifierAdapter::new(forest, decoder()).unwrap()
    }

    fn vector(room: &str) -> FeatureVector {
        let store: CalibrationStore =
            [("IMEI_IPHONE_X".to_string(), DeviceStats::new(-75.0, 8.0))].into_iter().collect();
        FeatureBuilder::new(&store).build(&TelemetryRecord::new("IMEI_IPHONE_X", room, -71.76))
    }

    #[test]
    fn predicts_label_and_rounded_confidence() {
        let prediction = adapter().predict(&vector("Ward")).unwrap();
        assert_eq!(prediction.label, "Enfermaria");
        assert_eq!(prediction.class_index, 1);
        assert_eq!(prediction.confidence, 0.6667);

        let corridor = adapter().predict(&vector("Corridor")).unwrap();
        assert_eq!(corridor.label, "Corredor");
        assert_eq!(corridor.confidence, 1.0);
    }

    #[test]
    fn not_loaded_fails_with_model_not_ready() {
        let adapter = ClassifierAdapter::not_loaded();
        assert!(!adapter.is_ready());
        assert_eq!(adapter.predict(&vector("Ward")), Err(MLError::ModelNotReady));
    }

    #[test]
    fn decoder_must_match_class_count() {
        let tree = DecisionTree::new(vec![Node::leaf([1.0, 1.0, 1.0])]);
        let forest = RandomForestClassifier::new(5, 3, vec![tree]).unwrap();
        assert!(matches!(
            ClassifierAdapter::new(forest, decoder()),
            Err(MLError::ShapeMismatch { expected: 3, got: 2, .. })
        ));
    }

    /// Predicts a fixed class regardless of its probabilities
    #[derive(Debug)]
    struct FixedVote {
        class: usize,
        proba: Vec<f64>,
    }

    impl Classifier for FixedVote {
        fn n_features(&self) -> usize {
            5
        }

        fn n_classes(&self) -> usize {
            self.proba.len()
        }

        fn predict_proba(&self, _features: &[f64]) -> MLResult<Vec<f64>> {
            Ok(self.proba.clone())
        }

        fn predict(&self, _features: &[f64]) -> MLResult<usize> {
            Ok(self.class)
        }
    }

    #[test]
    fn label_comes_from_classifier_predict() {
        let classifier = FixedVote {
            class: 0,
            proba: vec![0.3, 0.7],
        };
        let adapter = ClassifierAdapter::new(classifier, decoder()).unwrap();
        let prediction = adapter.predict(&vector("Ward")).unwrap();
        assert_eq!(prediction.class_index, 0);
        assert_eq!(prediction.label, "Corredor");
        assert_eq!(prediction.confidence, 0.7);
    }

    #[test]
    fn malformed_probabilities_are_rejected() {
        let classifier = FixedVote {
            class: 1,
            proba: vec![0.9, 0.9],
        };
        let adapter = ClassifierAdapter::new(classifier, decoder()).unwrap();
        assert!(matches!(
            adapter.predict(&vector("Ward")),
            Err(MLError::InvalidProbabilities(_))
        ));
    }

    #[test]
    fn debug_lists_classes() {
        let text = format!("{:?}", adapter());
        assert!(text.contains("Enfermaria"));
    }
}
