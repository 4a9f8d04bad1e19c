//! Box/plateau stage: reject sustained flat elevated readings.
//!
//! A parked car or dumped object under the sensor produces a long flat
//! "depth" that never existed. The signature is a valid zero-depth point
//! followed by a run of elevated points that stay within a relative band of
//! the first elevated value. The whole elevated group is rejected; the zero
//! anchor itself stays valid.

use crate::app::models::ProcessedReading;
use crate::config::FilterConfig;
use std::collections::BTreeMap;
use tracing::debug;

/// Reject plateau groups of more than one point
///
/// Scans each sensor's chronological positions. When a plateau group is
/// marked, scanning resumes at the position after the group; a lone elevated
/// point is left alone and the scan advances by one. Returns the number of
/// readings rejected.
pub fn apply(
    readings: &mut [ProcessedReading],
    sensor_indices: &BTreeMap<String, Vec<usize>>,
    config: &FilterConfig,
) -> usize {
    let mut rejected = 0;

    for indices in sensor_indices.values() {
        let mut k = 0;
        while k + 2 < indices.len() {
            let i1 = indices[k];

            // Plateau anchor: a still-valid point at exactly zero depth
            if readings[i1].depth_mm != Some(0.0) || !readings[i1].nyc_valid {
                k += 1;
                continue;
            }

            let i2 = indices[k + 1];
            let anchor_depth = match readings[i2].depth_mm {
                Some(d) if d > 0.0 && readings[i2].nyc_valid => d,
                _ => {
                    k += 1;
                    continue;
                }
            };

            // Candidate plateau: extend while points stay within the band
            let mut group_positions = vec![k + 1];
            let mut j = k + 2;
            while j < indices.len() {
                let ij = indices[j];
                let Some(dj) = readings[ij].depth_mm else {
                    break;
                };
                if !readings[ij].nyc_valid {
                    break;
                }

                let metric = ((dj - anchor_depth) / anchor_depth).abs();
                if metric < config.box_metric_threshold {
                    group_positions.push(j);
                    j += 1;
                } else {
                    break;
                }
            }

            if group_positions.len() > 1 {
                for &pos in &group_positions {
                    let idx = indices[pos];
                    readings[idx].filtered_box = true;
                    readings[idx].nyc_valid = false;
                    readings[idx].depth_mm = None;
                    rejected += 1;
                }
                // Resume after the group
                k = group_positions[group_positions.len() - 1] + 1;
            } else {
                k += 1;
            }
        }
    }

    debug!(
        rejected,
        metric_threshold = config.box_metric_threshold,
        "box/plateau stage complete"
    );
    rejected
}
