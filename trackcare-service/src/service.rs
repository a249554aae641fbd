//! Prediction service
//!
//! Runs one record through `validate -> build features -> classify ->
//! assemble`. The service holds nothing but a shared, immutable
//! [`ModelContext`], so clones are cheap and any number of threads may call
//! it at once without locking.

use std::sync::Arc;

use trackcare_artifacts::ModelContext;
use trackcare_core::{FeatureBuilder, RecordValidator, TelemetryRecord, Validator};

use crate::errors::{ServiceError, ServiceResult};
use crate::response::{BatchEntry, BatchOutcome, PredictionResult};

/// Room prediction over a loaded model context
#[derive(Debug, Clone)]
pub struct PredictionService {
    context: Option<Arc<ModelContext>>,
    validator: RecordValidator,
}

impl PredictionService {
    /// Serve from `context`
    pub fn new(context: Arc<ModelContext>) -> Self {
        Self {
            context: Some(context),
            validator: RecordValidator::default(),
        }
    }

    /// Service with no model; every prediction fails with
    /// [`ServiceError::ModelNotReady`]
    pub fn not_ready() -> Self {
        Self {
            context: None,
            validator: RecordValidator::default(),
        }
    }

    /// True once a model context is attached
    pub fn is_ready(&self) -> bool {
        self.context.as_ref().is_some_and(|c| c.classifier().is_ready())
    }

    /// The attached model context
    pub fn context(&self) -> Option<&ModelContext> {
        self.context.as_deref()
    }

    /// Predict the room for one record
    pub fn predict_one(&self, record: &TelemetryRecord) -> ServiceResult<PredictionResult> {
        if let Err(err) = self.validator.validate(record) {
            log::warn!("rejected record from device {}: {err}", record.device_id);
            return Err(err.into());
        }

        let context = self.context.as_deref().ok_or(ServiceError::ModelNotReady)?;

        let features = FeatureBuilder::new(context.calibration()).build(record);
        let prediction = context.classifier().predict(&features).map_err(|err| {
            log::error!("classification failed for device {}: {err}", record.device_id);
            ServiceError::from(err)
        })?;

        Ok(PredictionResult {
            predicted_room: prediction.label,
            confidence: prediction.confidence,
            used_fallback_calibration: features.used_fallback_calibration(),
            normalization_applied: record.rssi != features.normalized_rssi,
            model_version: context.model_version().to_string(),
        })
    }

    /// Predict every record independently, keeping input order
    pub fn predict_batch(&self, records: &[TelemetryRecord]) -> BatchOutcome {
        let entries = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let result = self.predict_one(record);
                if let Err(err) = &result {
                    log::warn!("batch record {index} failed: {err}");
                }
                BatchEntry::from(result)
            })
            .collect();

        BatchOutcome::new(entries)
    }
}

impl Default for PredictionService {
    fn default() -> Self {
        Self::not_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_service() {
        let service = PredictionService::not_ready();
        assert!(!service.is_ready());
        assert!(service.context().is_none());

        let record = TelemetryRecord::new("IMEI_IPHONE_X", "Ward", -71.76);
        assert_eq!(service.predict_one(&record), Err(ServiceError::ModelNotReady));
    }

    #[test]
    fn validation_precedes_readiness() {
        let record = TelemetryRecord::new("IMEI_IPHONE_X", "Ward", 50.0);
        let err = PredictionService::not_ready().predict_one(&record).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[test]
    fn service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PredictionService>();
    }
}
