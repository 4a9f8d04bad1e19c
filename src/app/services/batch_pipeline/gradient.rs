//! Gradient spike stage: reject implausibly fast depth changes.
//!
//! Each sensor's points are walked in time order and compared against the most
//! recently *accepted* prior point, not simply the preceding raw record. A
//! rejected point never advances the comparison cursor, so one spike cannot
//! poison the rate computed for the point after it.

use crate::app::models::ProcessedReading;
use crate::config::FilterConfig;
use std::collections::BTreeMap;
use tracing::debug;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Reject points whose depth change rate against the last accepted point
/// exceeds the configured threshold
///
/// `sensor_indices` maps each sensor to the chronological positions of its
/// readings within `readings`. Returns the number of readings rejected.
pub fn apply(
    readings: &mut [ProcessedReading],
    sensor_indices: &BTreeMap<String, Vec<usize>>,
    config: &FilterConfig,
) -> usize {
    let mut rejected = 0;

    for indices in sensor_indices.values() {
        let mut last_accepted: Option<usize> = None;

        for &i in indices {
            if let Some(prev_idx) = last_accepted
                && let Some(depth) = readings[i].depth_mm
                && let Some(prev_depth) = readings[prev_idx].depth_mm
            {
                let dt_ms = readings[i]
                    .received_at
                    .signed_duration_since(readings[prev_idx].received_at)
                    .num_milliseconds() as f64;
                let dt_min = dt_ms / MS_PER_MINUTE;
                // No rate for coincident timestamps
                if dt_min > 0.0 {
                    let rate = (depth - prev_depth).abs() / dt_min;
                    readings[i].gradient_rate_mm_per_min = Some(rate);
                    if rate > config.gradient_threshold_mm_per_min {
                        readings[i].filtered_gradient = true;
                        readings[i].nyc_valid = false;
                        readings[i].depth_mm = None;
                        rejected += 1;
                    }
                }
            }

            // Only accepted points advance the cursor
            if readings[i].depth_mm.is_some() && readings[i].nyc_valid {
                last_accepted = Some(i);
            }
        }
    }

    debug!(
        rejected,
        threshold_mm_per_min = config.gradient_threshold_mm_per_min,
        "gradient spike stage complete"
    );
    rejected
}
