//! Feature Building
//!
//! ## Overview
//!
//! Turns one raw [`TelemetryRecord`] into the fixed five-feature vector the
//! room classifier was trained on. This stage never fails: every missing or
//! unknown input degrades to a documented default, and the defaults taken are
//! recorded in [`FeatureProvenance`].
//!
//! ## Features
//!
//! | # | Name                    | Source                                   |
//! |---|-------------------------|------------------------------------------|
//! | 0 | `rssi_normalized`       | `clip((rssi - mean) / std, -5, 5)`       |
//! | 1 | `sensor_room_encoded`   | room vocabulary code, unknown → 1        |
//! | 2 | `hour`                  | timestamp hour, missing → 12             |
//! | 3 | `rssi_binned`           | raw rssi bucket 0..=3                    |
//! | 4 | `rssi_room_interaction` | `rssi_normalized × sensor_room_encoded`  |
//!
//! ## Binning Uses Raw RSSI
//!
//! The bin captures absolute physical signal strength. Computing it from the
//! normalized value would fold per-device calibration drift back into a
//! feature meant to be independent of it.
//!
//! ```text
//! rssi <= -90  -> 0   (very weak)
//! rssi <= -70  -> 1   (weak)
//! rssi <= -50  -> 2   (good)
//! otherwise    -> 3   (strong)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use trackcare_core::{CalibrationStore, DeviceStats, FeatureBuilder, TelemetryRecord};
//!
//! let store: CalibrationStore =
//!     [("IMEI_IPHONE_X".to_string(), DeviceStats::new(-75.0, 8.0))].into_iter().collect();
//! let builder = FeatureBuilder::new(&store);
//!
//! let v = builder.build(&TelemetryRecord::new("IMEI_IPHONE_X", "Ward", -71.76));
//! assert!((v.normalized_rssi - 0.405).abs() < 1e-9);
//! assert_eq!(v.rssi_bin, 1);
//! assert_eq!(v.room_code, 0);
//! assert_eq!(v.hour_of_day, 12);
//! ```

use crate::{
    calibration::{CalibrationSource, CalibrationStore},
    constants::{
        FEATURE_COUNT, NORMALIZED_RSSI_CLIP, RSSI_BIN_FAIR_DBM, RSSI_BIN_GOOD_DBM,
        RSSI_BIN_WEAK_DBM,
    },
    telemetry::{Room, TelemetryRecord},
    time::{hour_of_day, HourSource},
};

/// Feature names in model input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "rssi_normalized",
    "sensor_room_encoded",
    "hour",
    "rssi_binned",
    "rssi_room_interaction",
];

/// Which inputs fell back to defaults while building a vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureProvenance {
    /// Calibration statistics used
    pub calibration: CalibrationSource,
    /// Reference room was not in the vocabulary
    pub room_fallback: bool,
    /// Hour of day origin
    pub hour: HourSource,
}

/// Classifier input for one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Clipped per-device z-score of the RSSI
    pub normalized_rssi: f64,
    /// Room vocabulary code
    pub room_code: u8,
    /// Hour of day, 0-23
    pub hour_of_day: u32,
    /// Raw RSSI bucket, 0-3
    pub rssi_bin: u8,
    /// `normalized_rssi × room_code`
    pub interaction: f64,
    /// Defaults taken while building
    pub provenance: FeatureProvenance,
}

impl FeatureVector {
    /// Features in model input order, see [`FEATURE_NAMES`]
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.normalized_rssi,
            f64::from(self.room_code),
            f64::from(self.hour_of_day),
            f64::from(self.rssi_bin),
            self.interaction,
        ]
    }

    /// True when the device had no calibration of its own
    pub fn used_fallback_calibration(&self) -> bool {
        self.provenance.calibration == CalibrationSource::Fallback
    }
}

/// Builds feature vectors against a calibration store
#[derive(Debug, Clone, Copy)]
pub struct FeatureBuilder<'a> {
    calibration: &'a CalibrationStore,
}

impl<'a> FeatureBuilder<'a> {
    /// Create a builder reading from `calibration`
    pub fn new(calibration: &'a CalibrationStore) -> Self {
        Self { calibration }
    }

    /// Build the feature vector for one record
    pub fn build(&self, record: &TelemetryRecord) -> FeatureVector {
        let calibration = self.calibration.lookup(&record.device_id);
        let normalized_rssi = clip_normalized(calibration.z_score(record.rssi));

        let (hour, hour_source) = hour_of_day(record.timestamp.as_deref());
        if hour_source == HourSource::Default && record.timestamp.is_some() {
            log::debug!("unparseable timestamp {:?}, using default hour", record.timestamp);
        }

        let room = Room::resolve(&record.reference_room);
        if room.fallback {
            log::debug!(
                "unknown reference room {:?}, encoding as {}",
                record.reference_room,
                room.room.name()
            );
        }
        let room_code = room.room.code();

        FeatureVector {
            normalized_rssi,
            room_code,
            hour_of_day: hour,
            rssi_bin: rssi_bin(record.rssi),
            interaction: normalized_rssi * f64::from(room_code),
            provenance: FeatureProvenance {
                calibration: calibration.source,
                room_fallback: room.fallback,
                hour: hour_source,
            },
        }
    }
}

/// Bucket a raw RSSI into one of four strength bins
pub fn rssi_bin(rssi: f64) -> u8 {
    if rssi <= RSSI_BIN_WEAK_DBM {
        0
    } else if rssi <= RSSI_BIN_FAIR_DBM {
        1
    } else if rssi <= RSSI_BIN_GOOD_DBM {
        2
    } else {
        3
    }
}

/// Clip a z-score to the symmetric normalization bound
pub fn clip_normalized(z: f64) -> f64 {
    z.clamp(-NORMALIZED_RSSI_CLIP, NORMALIZED_RSSI_CLIP)
}
