//! Blip stage: reject transient 3-point spike-and-return patterns.
//!
//! A blip is a single reading that jumps up and immediately falls back to the
//! starting level, typically a vehicle or debris passing under the sensor.
//! Triplets slide over the fixed chronological index list produced for the
//! gradient stage; a triplet containing an already-invalid point is skipped
//! outright, the window does not re-close around the gap.

use crate::app::models::ProcessedReading;
use crate::config::FilterConfig;
use std::collections::BTreeMap;
use tracing::debug;

/// Mark the middle point of qualifying (D1, D2, D3) triplets as a blip
///
/// A triplet qualifies when `D2 − D1` exceeds the minimum rising edge and
/// `|D3 − D1| / (D2 − D1)` falls below the metric threshold, meaning D3
/// nearly returned to D1's level. Returns the number of readings rejected.
pub fn apply(
    readings: &mut [ProcessedReading],
    sensor_indices: &BTreeMap<String, Vec<usize>>,
    config: &FilterConfig,
) -> usize {
    let mut rejected = 0;

    for indices in sensor_indices.values() {
        for k in 2..indices.len() {
            let i1 = indices[k - 2];
            let i2 = indices[k - 1];
            let i3 = indices[k];

            let (Some(d1), Some(d2), Some(d3)) = (
                readings[i1].depth_mm,
                readings[i2].depth_mm,
                readings[i3].depth_mm,
            ) else {
                continue;
            };
            if !readings[i1].nyc_valid || !readings[i2].nyc_valid || !readings[i3].nyc_valid {
                continue;
            }

            let delta = d2 - d1;
            if delta <= config.blip_min_delta_mm {
                continue;
            }

            let metric = ((d3 - d1) / delta).abs();
            if metric < config.blip_metric_threshold {
                readings[i2].filtered_blip = true;
                readings[i2].nyc_valid = false;
                readings[i2].depth_mm = None;
                rejected += 1;
            }
        }
    }

    debug!(
        rejected,
        min_delta_mm = config.blip_min_delta_mm,
        metric_threshold = config.blip_metric_threshold,
        "blip stage complete"
    );
    rejected
}
