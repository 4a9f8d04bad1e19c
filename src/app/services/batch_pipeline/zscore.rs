//! Batch z-score stage: flag statistical outliers among surviving depths.
//!
//! Runs per sensor over the depths still valid after the filter stages, using
//! *sample* statistics (n−1) over the sensor's full surviving history. This is
//! a separate anomaly model from the streaming validator's rolling
//! population-variance check and the two are never reconciled.

use crate::app::models::ProcessedReading;
use crate::app::services::stats;
use crate::config::FilterConfig;
use std::collections::BTreeMap;
use tracing::debug;

/// Score surviving depths per sensor and flag anomalies
///
/// Sensors with fewer than two surviving depths, or a zero/non-finite
/// standard deviation, are skipped and their readings keep a `None` z-score.
/// Flagged readings stay valid; they are excluded from the clean set through
/// the anomaly flag alone. Returns the number of anomalies flagged.
pub fn apply(
    readings: &mut [ProcessedReading],
    sensor_indices: &BTreeMap<String, Vec<usize>>,
    config: &FilterConfig,
) -> usize {
    let mut anomalies = 0;

    for indices in sensor_indices.values() {
        let mut depths = Vec::new();
        let mut depth_indices = Vec::new();
        for &i in indices {
            if let Some(depth) = readings[i].depth_mm
                && readings[i].nyc_valid
            {
                depths.push(depth);
                depth_indices.push(i);
            }
        }

        if depths.len() < 2 {
            continue;
        }

        let Some(mean) = stats::mean(&depths) else {
            continue;
        };
        let Some(variance) = stats::sample_variance(&depths) else {
            continue;
        };
        let std = variance.sqrt();
        if !std.is_finite() || std == 0.0 {
            continue;
        }

        for (&i, &depth) in depth_indices.iter().zip(depths.iter()) {
            let z = (depth - mean) / std;
            readings[i].z_score = Some(z);
            if z.abs() > config.batch_z_threshold {
                readings[i].z_anomaly = true;
                anomalies += 1;
            }
        }
    }

    debug!(
        anomalies,
        threshold = config.batch_z_threshold,
        "batch z-score stage complete"
    );
    anomalies
}
