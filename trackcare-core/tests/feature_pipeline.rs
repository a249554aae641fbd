//! Records through validation and feature building

use trackcare_core::time::HourSource;
use trackcare_core::{
    CalibrationSource, CalibrationStore, DeviceStats, FeatureBuilder, RecordValidator, Room,
    TelemetryRecord, ValidationError, Validator, FEATURE_NAMES,
};

fn store() -> CalibrationStore {
    [
        ("IMEI_IPHONE_X", DeviceStats::new(-75.0, 8.0)),
        ("IMEI_SAMSUNG_S23", DeviceStats::new(-85.0, 4.0)),
        ("IMEI_FLAT", DeviceStats::new(-60.0, 0.0)),
    ]
    .into_iter()
    .map(|(id, stats)| (id.to_string(), stats))
    .collect()
}

#[test]
fn reference_record() {
    let store = store();
    let record = TelemetryRecord::new("IMEI_IPHONE_X", "Ward", -71.76).with_timestamp("2025-03-14T21:05:00");

    RecordValidator::default().validate(&record).unwrap();
    let vector = FeatureBuilder::new(&store).build(&record);

    assert!((vector.normalized_rssi - 0.405).abs() < 1e-9);
    assert_eq!(vector.room_code, Room::Ward.code());
    assert_eq!(vector.hour_of_day, 21);
    assert_eq!(vector.rssi_bin, 1);
    assert_eq!(vector.interaction, 0.0);
    assert_eq!(vector.provenance.calibration, CalibrationSource::Device);
    assert_eq!(vector.provenance.hour, HourSource::Parsed);
    assert_eq!(vector.to_array().len(), FEATURE_NAMES.len());
}

#[test]
fn every_default_at_once() {
    let store = store();
    let record = TelemetryRecord::new("IMEI_UNKNOWN", "Pharmacy", -70.0).with_timestamp("yesterday");
    let vector = FeatureBuilder::new(&store).build(&record);

    // fallback mean -73.33, std (8 + 4 + 0) / 3 = 4
    assert!(vector.used_fallback_calibration());
    assert!(vector.provenance.room_fallback);
    assert_eq!(vector.provenance.hour, HourSource::Default);
    assert_eq!(vector.room_code, 1);
    assert_eq!(vector.hour_of_day, 12);
    assert!((vector.normalized_rssi - (-70.0 + 220.0 / 3.0) / 4.0).abs() < 1e-9);
    assert_eq!(vector.interaction, vector.normalized_rssi);
}

#[test]
fn zero_std_device_is_not_nan() {
    let store = store();
    let vector = FeatureBuilder::new(&store).build(&TelemetryRecord::new("IMEI_FLAT", "Corridor", -58.0));
    assert_eq!(vector.normalized_rssi, 2.0);
    assert_eq!(vector.interaction, 4.0);
}

#[test]
fn saturated_readings_are_clipped() {
    let store = store();
    let builder = FeatureBuilder::new(&store);
    let strong = builder.build(&TelemetryRecord::new("IMEI_SAMSUNG_S23", "Surroundings", 0.0));
    let weak = builder.build(&TelemetryRecord::new("IMEI_SAMSUNG_S23", "Surroundings", -120.0));

    assert_eq!(strong.normalized_rssi, 5.0);
    assert_eq!(strong.rssi_bin, 3);
    assert_eq!(weak.normalized_rssi, -5.0);
    assert_eq!(weak.rssi_bin, 0);
    assert_eq!(weak.interaction, -15.0);
}

#[test]
fn empty_store_normalizes_against_zero_mean() {
    let store = CalibrationStore::default();
    let vector = FeatureBuilder::new(&store).build(&TelemetryRecord::new("IMEI_ANY", "Ward", -3.0));
    assert!(vector.used_fallback_calibration());
    assert_eq!(vector.normalized_rssi, -3.0);
}

#[test]
fn out_of_range_record_is_rejected() {
    let record = TelemetryRecord::new("IMEI_IPHONE_X", "Ward", 50.0);
    assert_eq!(
        RecordValidator::default().validate(&record),
        Err(ValidationError::RssiOutOfRange {
            value: 50.0,
            min: -120.0,
            max: 0.0
        })
    );
}
