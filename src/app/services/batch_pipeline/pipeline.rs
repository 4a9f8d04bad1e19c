//! Pipeline orchestration for batch cleaning.
//!
//! Builds the arena of processed records plus per-sensor chronological index
//! lists, then runs the filter stages strictly in order, each consuming the
//! cumulative validity state left by the previous stage.

use crate::app::models::{ProcessedReading, RawReading};
use crate::app::services::baseline;
use crate::config::FilterConfig;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::stats::{PipelineResult, PipelineStats};
use super::{blip, box_filter, gradient, noise_floor, zscore};

/// Batch cleaning pipeline for flood-sensor reading series
///
/// A pure, stateless transformation over an immutable snapshot of raw
/// readings. Independent sensors share no state, so a caller may split its
/// input per sensor and run pipelines in parallel without synchronization.
///
/// # Example
///
/// ```rust
/// use floodsense_processor::FloodFilterPipeline;
/// use floodsense_processor::config::FilterConfig;
///
/// let pipeline = FloodFilterPipeline::new(FilterConfig::default());
/// let result = pipeline.process_readings(Vec::new());
/// assert_eq!(result.readings.len(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct FloodFilterPipeline {
    /// Filter thresholds injected at construction
    config: FilterConfig,
}

impl FloodFilterPipeline {
    /// Create a new pipeline with the given filter configuration
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Access the pipeline's filter configuration
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Run the full cleaning pipeline over a snapshot of raw readings
    ///
    /// Readings are sorted by time and grouped per sensor; baselines are
    /// recomputed from scratch from this snapshot. Readings without a
    /// distance are counted and skipped. Output order is global time order.
    pub fn process_readings(&self, raw: Vec<RawReading>) -> PipelineResult {
        let mut stats = PipelineStats::new();
        stats.total_input = raw.len();

        if raw.is_empty() {
            return PipelineResult::new(Vec::new(), stats);
        }

        info!("Starting batch cleaning pipeline for {} readings", raw.len());

        let mut sorted = raw;
        sorted.sort_by_key(|r| r.received_at);

        // Per-sensor baselines over the full snapshot
        let mut by_sensor: BTreeMap<String, Vec<RawReading>> = BTreeMap::new();
        for reading in &sorted {
            by_sensor
                .entry(reading.sensor_id.clone())
                .or_default()
                .push(reading.clone());
        }
        let baselines: BTreeMap<String, _> = by_sensor
            .iter()
            .filter_map(|(sensor_id, readings)| {
                baseline::estimate_baseline(sensor_id, readings, &self.config)
                    .map(|b| (sensor_id.clone(), b))
            })
            .collect();

        // Arena of processed records plus chronological index lists per sensor
        let mut readings: Vec<ProcessedReading> = Vec::with_capacity(sorted.len());
        let mut sensor_indices: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for raw_reading in &sorted {
            let Some(distance) = raw_reading.distance_mm else {
                stats.skipped_missing_distance += 1;
                continue;
            };
            let Some((baseline_mm, source)) = baseline::baseline_for_reading(
                baselines.get(&raw_reading.sensor_id),
                raw_reading,
            ) else {
                stats.skipped_missing_distance += 1;
                continue;
            };

            let idx = readings.len();
            readings.push(ProcessedReading::init(
                raw_reading.sensor_id.clone(),
                raw_reading.received_at,
                distance,
                baseline_mm,
                source,
            ));
            sensor_indices
                .entry(raw_reading.sensor_id.clone())
                .or_default()
                .push(idx);
        }
        stats.sensors_processed = sensor_indices.len();

        // Stages run strictly in order over the shared arena
        stats.noise_floor_clamped = noise_floor::apply(&mut readings, &self.config);
        stats.gradient_rejected = gradient::apply(&mut readings, &sensor_indices, &self.config);
        stats.blip_rejected = blip::apply(&mut readings, &sensor_indices, &self.config);
        stats.box_rejected = box_filter::apply(&mut readings, &sensor_indices, &self.config);
        stats.z_anomalies = zscore::apply(&mut readings, &sensor_indices, &self.config);

        stats.clean_output = readings.iter().filter(|r| r.is_clean()).count();

        debug!(
            sensors = stats.sensors_processed,
            clean = stats.clean_output,
            "pipeline stages complete"
        );
        info!("{}", stats.summary());

        PipelineResult::new(readings, stats)
    }

    /// Run the pipeline for a single sensor's readings
    ///
    /// Convenience seam for parallel callers that have already split their
    /// snapshot per sensor.
    pub fn process_sensor(&self, readings: Vec<RawReading>) -> PipelineResult {
        self.process_readings(readings)
    }
}
