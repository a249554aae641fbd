//! Core data model and feature pipeline for Track&Care room inference
//!
//! Converts a raw tag sighting into the calibrated feature vector consumed by
//! the room classifier. Nothing in this crate performs I/O or holds mutable
//! shared state: the calibration store is built once and only read afterwards.
//!
//! ```rust
//! use trackcare_core::{
//!     CalibrationStore, DeviceStats, FeatureBuilder, TelemetryRecord, validation::validate_rssi,
//! };
//!
//! let store: CalibrationStore =
//!     [("IMEI_SAMSUNG_S23".to_string(), DeviceStats::new(-85.0, 4.0))].into_iter().collect();
//!
//! let record = TelemetryRecord::new("IMEI_SAMSUNG_S23", "Enfermaria", -84.13);
//! validate_rssi(record.rssi)?;
//!
//! let features = FeatureBuilder::new(&store).build(&record);
//! assert_eq!(features.room_code, 0);
//! # Ok::<(), trackcare_core::ValidationError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod calibration;
pub mod constants;
pub mod errors;
pub mod features;
pub mod telemetry;
pub mod time;
pub mod validation;

// Public API
pub use calibration::{CalibrationLookup, CalibrationSource, CalibrationStore, DeviceStats};
pub use errors::{ValidationError, ValidationResult};
pub use features::{FeatureBuilder, FeatureProvenance, FeatureVector, FEATURE_NAMES};
pub use telemetry::{Room, RoomResolution, TelemetryRecord};
pub use validation::{RecordValidator, RssiValidator, Validator, ValidatorConstraints};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
