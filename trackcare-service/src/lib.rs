//! Room Prediction Service for Track&Care Telemetry
//!
//! ## Overview
//!
//! Given an RSSI sighting of a wearable tag, predict which room the tag is in.
//! Each request runs four steps:
//!
//! ```text
//! TelemetryRecord
//!   -> validate        rssi in [-120, 0] dBm, else InvalidInput (client)
//!   -> build features  calibration, room code, hour, bin (never fails)
//!   -> classify        ModelNotReady / Prediction errors (server)
//!   -> assemble        PredictionResult
//! ```
//!
//! Batches run the same steps per record. A failing record becomes an error
//! entry in its slot; it never aborts the batch.
//!
//! ## Transport
//!
//! This crate stops at serializable request and response types. An HTTP or
//! message-queue shell deserializes [`TelemetryRecord`]s, calls the service and
//! writes back a [`PredictionResult`], a [`BatchOutcome`], or an
//! [`ErrorDescriptor`] with the status from [`Fault::status_code`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use trackcare_artifacts::{ArtifactConfig, ModelContext};
//! use trackcare_service::{PredictionService, TelemetryRecord};
//!
//! let context = ModelContext::load(&ArtifactConfig::default())?;
//! let service = PredictionService::new(Arc::new(context));
//!
//! let record = TelemetryRecord::new("IMEI_IPHONE_X", "Ward", -71.76)
//!     .with_timestamp("2025-01-01T08:30:00");
//! match service.predict_one(&record) {
//!     Ok(result) => println!("{} ({})", result.predicted_room, result.confidence),
//!     Err(err) => eprintln!("{}: {err}", err.fault().status_code()),
//! }
//! # Ok::<(), trackcare_artifacts::ArtifactError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod errors;
pub mod response;
pub mod service;

pub use errors::{ErrorDescriptor, Fault, ServiceError, ServiceResult};
pub use response::{BatchEntry, BatchOutcome, PredictionResult};
pub use service::PredictionService;

pub use trackcare_core::TelemetryRecord;
