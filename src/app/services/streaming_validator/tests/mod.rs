//! Tests for the streaming validator and its reading store
//!
//! Async tests throughout; the validator is exercised against the in-memory
//! store the replay command uses.


use crate::app::models::RawReading;
use crate::config::FilterConfig;
use chrono::{DateTime, TimeZone, Utc};

pub const TEST_SENSOR: &str = "sensor-a";

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
}

/// Reading for the test sensor at a minute offset
pub fn reading_at(minutes: i64, distance_mm: Option<f64>) -> RawReading {
    RawReading::new(
        TEST_SENSOR,
        base_time() + chrono::Duration::minutes(minutes),
        distance_mm,
    )
}

/// Default config with a small rolling window so history fills quickly
pub fn small_window_config() -> FilterConfig {
    FilterConfig {
        streaming_window: 4,
        ..FilterConfig::default()
    }
}
