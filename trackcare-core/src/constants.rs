//! Pipeline Constants
//!
//! Centralized constants for the room inference pipeline. The classifier was
//! trained against features built with exactly these values, so changing any
//! of them invalidates the exported model artifacts.

// ===== RSSI PHYSICAL RANGE =====

/// Weakest RSSI accepted from a tag (dBm).
///
/// Readings below this are beneath the noise floor of BLE/Wi-Fi receivers and
/// indicate a corrupted packet rather than a distant tag.
pub const RSSI_MIN_DBM: f64 = -120.0;

/// Strongest RSSI accepted from a tag (dBm).
///
/// Received power cannot exceed 0 dBm for the radios in use.
pub const RSSI_MAX_DBM: f64 = 0.0;

// ===== NORMALIZATION =====

/// Symmetric clip bound applied to the per-device z-score.
pub const NORMALIZED_RSSI_CLIP: f64 = 5.0;

/// Standard deviation substituted when a calibration std is zero or undefined.
pub const FALLBACK_STD: f64 = 1.0;

/// Mean used for fallback calibration when the store holds no usable means.
pub const EMPTY_STORE_MEAN: f64 = 0.0;

// ===== TIME OF DAY =====

/// Hour used when the record has no parseable timestamp (midday).
pub const DEFAULT_HOUR_OF_DAY: u32 = 12;

// ===== RSSI BINNING =====

/// Upper (inclusive) edge of bin 0, very weak signal (dBm).
pub const RSSI_BIN_WEAK_DBM: f64 = -90.0;

/// Upper (inclusive) edge of bin 1, weak signal (dBm).
pub const RSSI_BIN_FAIR_DBM: f64 = -70.0;

/// Upper (inclusive) edge of bin 2, good signal (dBm). Anything above is bin 3.
pub const RSSI_BIN_GOOD_DBM: f64 = -50.0;

// ===== CLASSIFICATION OUTPUT =====

/// Decimal places kept on the reported confidence.
pub const CONFIDENCE_DECIMALS: i32 = 4;

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 5;
