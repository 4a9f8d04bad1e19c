//! Run statistics and result structures for the batch cleaning pipeline
//!
//! Tracks how many readings each filter stage clamped or rejected so a run can
//! be summarized for logging and reporting.

use crate::app::models::ProcessedReading;

/// Statistics for one batch pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    /// Total number of input readings
    pub total_input: usize,
    /// Readings skipped because they carried no distance value
    pub skipped_missing_distance: usize,
    /// Number of distinct sensors processed
    pub sensors_processed: usize,
    /// Readings clamped to zero depth by the noise floor (still valid)
    pub noise_floor_clamped: usize,
    /// Readings rejected by the gradient spike stage
    pub gradient_rejected: usize,
    /// Readings rejected by the blip stage
    pub blip_rejected: usize,
    /// Readings rejected by the box/plateau stage
    pub box_rejected: usize,
    /// Readings flagged as batch z-score anomalies (valid but excluded from
    /// the clean set)
    pub z_anomalies: usize,
    /// Final number of clean readings
    pub clean_output: usize,
}

impl PipelineStats {
    /// Create new empty pipeline statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Total readings rejected by the gradient, blip, and box stages
    pub fn rejected_total(&self) -> usize {
        self.gradient_rejected + self.blip_rejected + self.box_rejected
    }

    /// Share of processed readings that made it into the clean set
    pub fn clean_rate(&self) -> f64 {
        let processed = self.total_input - self.skipped_missing_distance;
        if processed == 0 {
            100.0
        } else {
            (self.clean_output as f64 / processed as f64) * 100.0
        }
    }

    /// Summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Pipeline summary: {} -> {} clean readings ({:.1}%) across {} sensors | \
             noise floor: {} clamped | rejected: {} gradient, {} blip, {} box | \
             z-anomalies: {} | missing distance: {}",
            self.total_input,
            self.clean_output,
            self.clean_rate(),
            self.sensors_processed,
            self.noise_floor_clamped,
            self.gradient_rejected,
            self.blip_rejected,
            self.box_rejected,
            self.z_anomalies,
            self.skipped_missing_distance
        )
    }

    /// Merge another run's statistics into this one (used when sensors are
    /// processed in parallel)
    pub fn merge(&mut self, other: &PipelineStats) {
        self.total_input += other.total_input;
        self.skipped_missing_distance += other.skipped_missing_distance;
        self.sensors_processed += other.sensors_processed;
        self.noise_floor_clamped += other.noise_floor_clamped;
        self.gradient_rejected += other.gradient_rejected;
        self.blip_rejected += other.blip_rejected;
        self.box_rejected += other.box_rejected;
        self.z_anomalies += other.z_anomalies;
        self.clean_output += other.clean_output;
    }
}

/// Result of a batch pipeline run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// One processed record per input reading with a distance, in time order
    pub readings: Vec<ProcessedReading>,
    /// Run statistics
    pub stats: PipelineStats,
}

impl PipelineResult {
    pub fn new(readings: Vec<ProcessedReading>, stats: PipelineStats) -> Self {
        Self { readings, stats }
    }

    /// The externally visible clean set: valid and not a z-score anomaly
    pub fn clean_readings(&self) -> impl Iterator<Item = &ProcessedReading> {
        self.readings.iter().filter(|r| r.is_clean())
    }

    /// Summary string for logging
    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}
