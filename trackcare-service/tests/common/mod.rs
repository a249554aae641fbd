//! Shared fixtures for service integration tests
//!
//! The fixture forest has four classes in label-encoder order
//! (`Arredores`, `Corredor`, `Enfermaria`, `Recepção`). One tree votes on the
//! reference room, the other on signal strength, so the expected winner of
//! every record can be worked out by hand.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use trackcare_artifacts::ModelContext;
use trackcare_core::{CalibrationStore, DeviceStats, TelemetryRecord};
use trackcare_ml::{DecisionTree, LabelDecoder, ModelArtifact, Node, RandomForestClassifier};
use trackcare_service::PredictionService;

pub const MODEL_VERSION: &str = "1.0.0";

pub const CLASSES: [&str; 4] = ["Arredores", "Corredor", "Enfermaria", "Recepção"];

/// Device in the calibration store with mean -75, std 8
pub const KNOWN_DEVICE: &str = "IMEI_IPHONE_X";

pub fn devices() -> BTreeMap<String, DeviceStats> {
    [
        (KNOWN_DEVICE, DeviceStats::new(-75.0, 8.0)),
        ("IMEI_TAG_07", DeviceStats::new(-85.0, 4.0)),
        ("IMEI_TAG_12", DeviceStats::new(-80.0, 0.0)),
    ]
    .into_iter()
    .map(|(id, stats)| (id.to_string(), stats))
    .collect()
}

pub fn calibration() -> CalibrationStore {
    CalibrationStore::new(devices())
}

pub fn forest() -> ModelArtifact {
    // Room code (feature 1): Ward 0, Reception 1, Corridor 2, Surroundings 3
    let by_room = DecisionTree::new(vec![
        Node::split(1, 0.5, 1, 2),
        Node::leaf([0.0, 1.0, 8.0, 1.0]),
        Node::split(1, 1.5, 3, 4),
        Node::leaf([1.0, 1.0, 0.0, 8.0]),
        Node::split(1, 2.5, 5, 6),
        Node::leaf([1.0, 8.0, 1.0, 0.0]),
        Node::leaf([8.0, 1.0, 0.0, 1.0]),
    ]);
    // Normalized RSSI (feature 0)
    let by_signal = DecisionTree::new(vec![
        Node::split(0, -1.0, 1, 2),
        Node::leaf([4.0, 2.0, 2.0, 2.0]),
        Node::leaf([1.0, 3.0, 3.0, 3.0]),
    ]);

    RandomForestClassifier::new(5, 4, vec![by_room, by_signal])
        .unwrap()
        .into()
}

pub fn decoder() -> LabelDecoder {
    LabelDecoder::new(CLASSES.iter().map(|c| c.to_string()).collect()).unwrap()
}

pub fn context() -> Arc<ModelContext> {
    Arc::new(ModelContext::new(calibration(), forest(), decoder(), MODEL_VERSION).unwrap())
}

pub fn service() -> PredictionService {
    PredictionService::new(context())
}

/// Service whose only device is calibrated at mean 0, std 2
pub fn zero_mean_service() -> PredictionService {
    let calibration: CalibrationStore =
        [("IMEI_ZERO".to_string(), DeviceStats::new(0.0, 2.0))].into_iter().collect();
    let context = ModelContext::new(calibration, forest(), decoder(), MODEL_VERSION).unwrap();
    PredictionService::new(Arc::new(context))
}

pub fn reference_record() -> TelemetryRecord {
    TelemetryRecord::new(KNOWN_DEVICE, "Ward", -71.76).with_location("-23.5505,-46.6333")
}

/// Write the fixture artifacts under their default file names
pub fn write_artifacts(dir: &Path) {
    fs::write(dir.join("best_model.json"), serde_json::to_string(&forest()).unwrap()).unwrap();
    fs::write(dir.join("label_encoder.json"), serde_json::to_string(&decoder()).unwrap()).unwrap();
    fs::write(dir.join("imei_stats.json"), serde_json::to_string(&devices()).unwrap()).unwrap();
}
