//! Storage seam for the streaming validator.
//!
//! The validator needs two lookups per reading: the sensor's most recent
//! calibration benchmark and a rolling window of prior distances. Concrete
//! persistence lives with the caller; the [`MemoryReadingStore`] here backs
//! the CLI replay command and the test suite.

use crate::app::models::RawReading;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// History and benchmark lookups for streaming validation
///
/// Implementations must return store failures as errors; the validator
/// surfaces them to the caller unmodified and never retries.
pub trait ReadingStore: Send + Sync {
    /// Distance of the sensor's most recent benchmark reading, if any
    fn benchmark_distance(
        &self,
        sensor_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<f64>>> + Send;

    /// Up to `limit` most-recent-first non-null distances for the sensor,
    /// excluding the reading currently being validated
    fn recent_distances(
        &self,
        sensor_id: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<f64>>> + Send;
}

#[derive(Debug, Clone)]
struct StoredReading {
    received_at: DateTime<Utc>,
    distance_mm: Option<f64>,
    is_benchmark: bool,
}

/// In-memory reading store for replay runs and tests
///
/// Keeps readings per sensor in insertion order; lookups scan backwards so
/// "most recent" follows receive time as long as readings are inserted
/// chronologically, which the replay command guarantees by sorting its input.
#[derive(Debug, Default)]
pub struct MemoryReadingStore {
    readings: Mutex<HashMap<String, Vec<StoredReading>>>,
}

impl MemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<StoredReading>>>> {
        self.readings
            .lock()
            .map_err(|_| Error::store("in-memory reading store lock poisoned"))
    }

    /// Insert a validated reading, optionally marking it as the sensor's
    /// benchmark
    pub fn insert(&self, reading: &RawReading, is_benchmark: bool) -> Result<()> {
        let mut readings = self.lock()?;
        readings
            .entry(reading.sensor_id.clone())
            .or_default()
            .push(StoredReading {
                received_at: reading.received_at,
                distance_mm: reading.distance_mm,
                is_benchmark,
            });
        Ok(())
    }

    /// Number of stored readings for a sensor
    pub fn len_for(&self, sensor_id: &str) -> Result<usize> {
        let readings = self.lock()?;
        Ok(readings.get(sensor_id).map_or(0, |r| r.len()))
    }
}

impl ReadingStore for MemoryReadingStore {
    async fn benchmark_distance(&self, sensor_id: &str) -> Result<Option<f64>> {
        let readings = self.lock()?;
        let Some(sensor_readings) = readings.get(sensor_id) else {
            return Ok(None);
        };
        // Most recent benchmark only; an older benchmark never substitutes
        let benchmark = sensor_readings
            .iter()
            .filter(|r| r.is_benchmark)
            .max_by_key(|r| r.received_at)
            .and_then(|r| r.distance_mm);
        Ok(benchmark)
    }

    async fn recent_distances(&self, sensor_id: &str, limit: usize) -> Result<Vec<f64>> {
        let readings = self.lock()?;
        let Some(sensor_readings) = readings.get(sensor_id) else {
            return Ok(Vec::new());
        };
        Ok(sensor_readings
            .iter()
            .rev()
            .filter_map(|r| r.distance_mm)
            .take(limit)
            .collect())
    }
}
