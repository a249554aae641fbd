//! Error Types for Telemetry Validation
//!
//! Only one stage of the pipeline can reject a record: input validation. The
//! feature builder and calibration store are total and degrade to defaults, so
//! they have no error type at all.
//!
//! ```rust
//! use trackcare_core::{ValidationError, validation::validate_rssi};
//!
//! match validate_rssi(50.0) {
//!     Ok(()) => {}
//!     Err(ValidationError::RssiOutOfRange { value, min, max }) => {
//!         assert_eq!(value, 50.0);
//!         assert!(min < max);
//!     }
//!     Err(ValidationError::NotFinite { .. }) => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons a telemetry record is refused before feature building.
///
/// Both variants are client faults: the record itself is wrong and resending
/// it unchanged will fail the same way.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// RSSI outside the physically possible range
    #[error("invalid RSSI {value} dBm: expected range {min} to {max} dBm")]
    RssiOutOfRange {
        /// The offending reading
        value: f64,
        /// Weakest accepted reading
        min: f64,
        /// Strongest accepted reading
        max: f64,
    },

    /// RSSI is NaN or infinite
    #[error("invalid RSSI {value}: expected range {min} to {max} dBm")]
    NotFinite {
        /// The offending reading
        value: f64,
        /// Weakest accepted reading
        min: f64,
        /// Strongest accepted reading
        max: f64,
    },
}

impl ValidationError {
    /// The offending RSSI value
    pub fn value(&self) -> f64 {
        match self {
            Self::RssiOutOfRange { value, .. } | Self::NotFinite { value, .. } => *value,
        }
    }

    /// The accepted range as `(min, max)`
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::RssiOutOfRange { min, max, .. } | Self::NotFinite { min, max, .. } => (*min, *max),
        }
    }
}
