//! Exported model artifacts
//!
//! The trained classifier is exported from the training notebook as JSON with
//! a `kind` tag selecting the model family:
//!
//! ```json
//! {
//!   "kind": "random_forest",
//!   "n_features": 5,
//!   "n_classes": 4,
//!   "trees": [ { "nodes": [ { "type": "leaf", "value": [1, 0, 0, 0] } ] } ]
//! }
//! ```
//!
//! Artifacts deserialize without checks; call [`ModelArtifact::validate`]
//! before serving from one.

use serde::{Deserialize, Serialize};

use crate::{Classifier, LogisticRegression, MLResult, RandomForestClassifier};

/// Any supported classifier family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Soft-voting tree ensemble
    RandomForest(RandomForestClassifier),
    /// Multinomial / binary logistic regression
    LogisticRegression(LogisticRegression),
}

impl ModelArtifact {
    /// Structural validation of the wrapped model
    pub fn validate(&self) -> MLResult<()> {
        match self {
            ModelArtifact::RandomForest(m) => m.validate(),
            ModelArtifact::LogisticRegression(m) => m.validate(),
        }
    }

    /// Family name, as written in the `kind` tag
    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::RandomForest(_) => "random_forest",
            ModelArtifact::LogisticRegression(_) => "logistic_regression",
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            ModelArtifact::RandomForest(m) => m,
            ModelArtifact::LogisticRegression(m) => m,
        }
    }
}

impl Classifier for ModelArtifact {
    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn n_classes(&self) -> usize {
        self.inner().n_classes()
    }

    fn predict_proba(&self, features: &[f64]) -> MLResult<Vec<f64>> {
        self.inner().predict_proba(features)
    }

    fn predict(&self, features: &[f64]) -> MLResult<usize> {
        self.inner().predict(features)
    }
}

impl From<RandomForestClassifier> for ModelArtifact {
    fn from(model: RandomForestClassifier) -> Self {
        ModelArtifact::RandomForest(model)
    }
}

impl From<LogisticRegression> for ModelArtifact {
    fn from(model: LogisticRegression) -> Self {
        ModelArtifact::LogisticRegression(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MLError;

    #[test]
    fn forest_artifact_from_json() {
        let json = r#"{
            "kind": "random_forest",
            "n_features": 5,
            "n_classes": 2,
            "trees": [
                {"nodes": [
                    {"type": "split", "feature": 3, "threshold": 1.5, "left": 1, "right": 2},
                    {"type": "leaf", "value": [9.0, 1.0]},
                    {"type": "leaf", "value": [2.0, 8.0]}
                ]}
            ]
        }"#;
        let model: ModelArtifact = serde_json::from_str(json).unwrap();
        model.validate().unwrap();
        assert_eq!(model.kind(), "random_forest");
        assert_eq!(model.n_features(), 5);
        assert_eq!(model.n_classes(), 2);
        assert_eq!(model.predict(&[0.0, 0.0, 12.0, 3.0, 0.0]).unwrap(), 1);
    }

    #[test]
    fn logistic_artifact_from_json() {
        let json = r#"{
            "kind": "logistic_regression",
            "n_features": 1,
            "n_classes": 2,
            "coefficients": [[2.0]],
            "intercepts": [-1.0]
        }"#;
        let model: ModelArtifact = serde_json::from_str(json).unwrap();
        model.validate().unwrap();
        assert_eq!(model.kind(), "logistic_regression");
        assert_eq!(model.predict(&[5.0]).unwrap(), 1);
    }

    #[test]
    fn invalid_artifact_fails_validation() {
        let json = r#"{"kind": "random_forest", "n_features": 5, "n_classes": 2, "trees": []}"#;
        let model: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(model.validate(), Err(MLError::EmptyModel));
    }

    #[test]
    fn unknown_kind_does_not_parse() {
        let json = r#"{"kind": "gradient_boosting", "n_features": 5}"#;
        assert!(serde_json::from_str::<ModelArtifact>(json).is_err());
    }
}
