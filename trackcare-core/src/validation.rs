//! Input validation
//!
//! The only hard constraint on a telemetry record is that its RSSI is a
//! physically possible reading. Device and room are deliberately not checked
//! here: unknown values degrade to fallbacks during feature building.

use serde::{Deserialize, Serialize};

use crate::{
    constants::{RSSI_MAX_DBM, RSSI_MIN_DBM},
    errors::{ValidationError, ValidationResult},
    telemetry::TelemetryRecord,
};

/// Limits a validator enforces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConstraints {
    /// Minimum accepted value (inclusive)
    pub min_value: f64,
    /// Maximum accepted value (inclusive)
    pub max_value: f64,
}

/// Validator for one kind of input
pub trait Validator {
    /// The type of value this validator handles
    type Value: ?Sized;

    /// Validate a single value
    fn validate(&self, value: &Self::Value) -> ValidationResult<()>;

    /// Limits enforced by this validator
    fn constraints(&self) -> ValidatorConstraints;
}

/// RSSI range validator
#[derive(Debug, Clone, Copy)]
pub struct RssiValidator {
    min_dbm: f64,
    max_dbm: f64,
}

impl Default for RssiValidator {
    fn default() -> Self {
        Self {
            min_dbm: RSSI_MIN_DBM,
            max_dbm: RSSI_MAX_DBM,
        }
    }
}

impl RssiValidator {
    /// Create a validator with custom limits
    pub fn new_with_limits(min: f64, max: f64) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        Self {
            min_dbm: min,
            max_dbm: max,
        }
    }
}

impl Validator for RssiValidator {
    type Value = f64;

    fn validate(&self, value: &f64) -> ValidationResult<()> {
        let value = *value;
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                value,
                min: self.min_dbm,
                max: self.max_dbm,
            });
        }
        if value > self.max_dbm || value < self.min_dbm {
            return Err(ValidationError::RssiOutOfRange {
                value,
                min: self.min_dbm,
                max: self.max_dbm,
            });
        }
        Ok(())
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: self.min_dbm,
            max_value: self.max_dbm,
        }
    }
}

/// Whole-record validator
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator {
    rssi: RssiValidator,
}

impl RecordValidator {
    /// Create from an RSSI validator
    pub fn new(rssi: RssiValidator) -> Self {
        Self { rssi }
    }
}

impl Validator for RecordValidator {
    type Value = TelemetryRecord;

    fn validate(&self, record: &TelemetryRecord) -> ValidationResult<()> {
        self.rssi.validate(&record.rssi)
    }

    fn constraints(&self) -> ValidatorConstraints {
        self.rssi.constraints()
    }
}

/// Check an RSSI against the default physical range
pub fn validate_rssi(rssi: f64) -> ValidationResult<()> {
    RssiValidator::default().validate(&rssi)
}
