//! Tests for the batch cleaning pipeline
//!
//! Unit tests per filter stage plus pipeline-level integration tests, with
//! shared fixture builders below.

pub mod blip_tests;
pub mod gradient_tests;
pub mod zscore_tests;

use crate::app::models::{BaselineSource, ProcessedReading, RawReading};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;

pub const TEST_SENSOR: &str = "sensor-a";
pub const TEST_BASELINE_MM: f64 = 1000.0;

/// Reference instant all fixtures offset from (midday UTC, outside the
/// nighttime baseline window)
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
}

/// Raw reading for the test sensor at a minute offset
pub fn raw_at(minutes: i64, distance_mm: Option<f64>) -> RawReading {
    RawReading::new(
        TEST_SENSOR,
        base_time() + chrono::Duration::minutes(minutes),
        distance_mm,
    )
}

/// Initialized processed record with the given depth at a minute offset
///
/// Distance is derived from the fixed test baseline so
/// `baseline - distance == depth`.
pub fn processed_at(minutes: i64, depth_mm: f64) -> ProcessedReading {
    ProcessedReading::init(
        TEST_SENSOR,
        base_time() + chrono::Duration::minutes(minutes),
        TEST_BASELINE_MM - depth_mm,
        TEST_BASELINE_MM,
        BaselineSource::NightMedian,
    )
}

/// Simulate an earlier stage rejecting a record
pub fn reject(reading: &mut ProcessedReading) {
    reading.nyc_valid = false;
    reading.depth_mm = None;
}

/// Build a single-sensor arena at 10-minute spacing from a list of depths,
/// plus the chronological index map the stage functions take
pub fn arena_from_depths(
    depths: &[f64],
) -> (Vec<ProcessedReading>, BTreeMap<String, Vec<usize>>) {
    let readings: Vec<ProcessedReading> = depths
        .iter()
        .enumerate()
        .map(|(i, &d)| processed_at(i as i64 * 10, d))
        .collect();
    let mut indices = BTreeMap::new();
    indices.insert(TEST_SENSOR.to_string(), (0..readings.len()).collect());
    (readings, indices)
}
