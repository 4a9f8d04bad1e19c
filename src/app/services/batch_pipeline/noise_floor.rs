//! Noise floor stage: clamp small depths to zero.
//!
//! Depths below the noise floor are sensor jitter, not water. This includes
//! negative depths, where the sensor read *farther* than its baseline. The
//! stage is a clamp, not a rejection: the record stays valid and keeps a zero
//! depth, which later makes it a potential anchor for the box/plateau stage.

use crate::app::models::ProcessedReading;
use crate::config::FilterConfig;
use tracing::debug;

/// Clamp every depth below the noise floor to zero
///
/// Returns the number of readings clamped.
pub fn apply(readings: &mut [ProcessedReading], config: &FilterConfig) -> usize {
    let mut clamped = 0;

    for reading in readings.iter_mut() {
        if let Some(depth) = reading.depth_mm
            && depth < config.noise_floor_mm
        {
            reading.depth_mm = Some(0.0);
            reading.noise_floor_applied = true;
            clamped += 1;
        }
    }

    debug!(clamped, threshold_mm = config.noise_floor_mm, "noise floor stage complete");
    clamped
}
