//! Per-Device RSSI Calibration
//!
//! ## Overview
//!
//! Two tags standing in the same spot rarely report the same RSSI: antenna
//! design, firmware and battery level all shift the reading by several dB. The
//! classifier therefore never sees raw RSSI. It sees a z-score computed against
//! the historical mean and standard deviation of the reporting device.
//!
//! ## Fallback Strategy
//!
//! A device that was not part of the historical data has no statistics of its
//! own. Rather than refusing it, the store answers with population-level
//! statistics: the average of every known device's mean and the average of
//! every known device's std. The lookup result is tagged with
//! [`CalibrationSource::Fallback`] so callers can report it.
//!
//! ```text
//! known device    -> (device mean, device std)         Device
//! unknown device  -> (avg of means, avg of stds)        Fallback
//! std == 0 / NaN  -> std = 1                            (either source)
//! ```
//!
//! Undefined entries (a device with a single historical sample has no std)
//! are skipped when computing the population averages.
//!
//! ## Lifecycle
//!
//! The store is built once from the calibration artifact and is read-only
//! afterwards. Population averages are computed at construction, so a lookup
//! is a single map probe.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{EMPTY_STORE_MEAN, FALLBACK_STD};

/// Historical RSSI statistics for one device.
///
/// Either field may be undefined in the artifact (serialized as `null`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceStats {
    /// Mean RSSI in dBm
    pub mean: Option<f64>,
    /// Standard deviation of RSSI in dB
    pub std: Option<f64>,
}

impl DeviceStats {
    /// Stats with both moments defined
    pub fn new(mean: f64, std: f64) -> Self {
        Self {
            mean: Some(mean),
            std: Some(std),
        }
    }
}

/// Where a calibration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalibrationSource {
    /// The device's own statistics
    Device,
    /// Population averages, device unknown
    Fallback,
}

/// Resolved calibration for one lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationLookup {
    /// Mean to subtract
    pub mean: f64,
    /// Std to divide by, never zero or NaN
    pub std: f64,
    /// Which statistics were used
    pub source: CalibrationSource,
}

impl CalibrationLookup {
    /// True when population statistics stood in for the device
    pub fn used_fallback(&self) -> bool {
        self.source == CalibrationSource::Fallback
    }

    /// Z-score of a raw reading under this calibration
    pub fn z_score(&self, rssi: f64) -> f64 {
        (rssi - self.mean) / self.std
    }
}

/// Read-only store of per-device statistics
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationStore {
    devices: BTreeMap<String, DeviceStats>,
    fallback_mean: Option<f64>,
    fallback_std: Option<f64>,
}

impl CalibrationStore {
    /// Build a store and precompute its population fallback
    pub fn new(devices: BTreeMap<String, DeviceStats>) -> Self {
        let fallback_mean = defined_average(devices.values().map(|s| s.mean));
        let fallback_std = defined_average(devices.values().map(|s| s.std));

        Self {
            devices,
            fallback_mean,
            fallback_std,
        }
    }

    /// Resolve the statistics to normalize a reading from `device_id` with
    pub fn lookup(&self, device_id: &str) -> CalibrationLookup {
        let (mean, std, source) = match self.devices.get(device_id) {
            Some(stats) => (stats.mean, stats.std, CalibrationSource::Device),
            None => (self.fallback_mean, self.fallback_std, CalibrationSource::Fallback),
        };

        if source == CalibrationSource::Fallback {
            log::debug!("no calibration for device {device_id}, using population fallback");
        }

        CalibrationLookup {
            mean: mean.unwrap_or(self.fallback_mean()),
            std: effective_std(std),
            source,
        }
    }

    /// Population mean used for unknown devices
    pub fn fallback_mean(&self) -> f64 {
        self.fallback_mean.unwrap_or(EMPTY_STORE_MEAN)
    }

    /// Population std used for unknown devices, after the zero/NaN guard
    pub fn fallback_std(&self) -> f64 {
        effective_std(self.fallback_std)
    }

    /// Whether the device has its own statistics
    pub fn contains(&self, device_id: &str) -> bool {
        self.devices.contains_key(device_id)
    }

    /// Number of calibrated devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// True when no device is calibrated
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Iterate calibrated devices in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeviceStats)> {
        self.devices.iter().map(|(id, stats)| (id.as_str(), stats))
    }
}

impl Default for CalibrationStore {
    /// Empty store; every lookup falls back to mean 0, std 1
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

impl FromIterator<(String, DeviceStats)> for CalibrationStore {
    fn from_iter<I: IntoIterator<Item = (String, DeviceStats)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Substitute 1 for a zero, NaN or missing std
fn effective_std(std: Option<f64>) -> f64 {
    match std {
        Some(s) if s != 0.0 && !s.is_nan() => s,
        _ => FALLBACK_STD,
    }
}

/// Mean of the defined, non-NaN values; `None` if there are none
fn defined_average(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
