//! Per-sensor baseline estimation.
//!
//! The baseline is a sensor's reference "no-water" distance. Nighttime
//! readings are the preferred source since the street is quiet and the sensor
//! should be looking at dry pavement; the estimator falls back to the full
//! history, and finally to the reading's own distance when a sensor has no
//! usable history at all (which yields a zero depth).
//!
//! Baselines are recomputed in full on every batch run. Nothing here is
//! incremental and nothing is shared across sensors.

use crate::app::models::{Baseline, BaselineSource, RawReading};
use crate::app::services::stats;
use crate::config::FilterConfig;
use crate::constants::is_night_hour;
use chrono::Timelike;
use tracing::debug;

/// Estimate the baseline distance for one sensor from its full history
///
/// Readings without a distance are ignored. Returns `None` when the sensor
/// has no distances at all; per-reading callers then fall back to
/// [`baseline_for_reading`].
pub fn estimate_baseline(
    sensor_id: &str,
    readings: &[RawReading],
    config: &FilterConfig,
) -> Option<Baseline> {
    let mut night_distances = Vec::new();
    let mut all_distances = Vec::new();

    for reading in readings {
        let Some(distance) = reading.distance_mm else {
            continue;
        };
        all_distances.push(distance);
        let hour = reading.received_at.hour();
        if is_night_hour(hour, config.night_start_hour, config.night_end_hour) {
            night_distances.push(distance);
        }
    }

    let (value_mm, source) = if let Some(night_median) = stats::median(&night_distances) {
        (night_median, BaselineSource::NightMedian)
    } else if let Some(all_median) = stats::median(&all_distances) {
        (all_median, BaselineSource::AllMedian)
    } else {
        return None;
    };

    debug!(
        sensor_id,
        value_mm,
        night_count = night_distances.len(),
        total_count = all_distances.len(),
        ?source,
        "estimated baseline"
    );

    Some(Baseline {
        sensor_id: sensor_id.to_string(),
        value_mm,
        source,
    })
}

/// Resolve the baseline for a single reading: the sensor baseline when one
/// exists, otherwise the reading's own distance (zero depth)
pub fn baseline_for_reading(
    sensor_baseline: Option<&Baseline>,
    reading: &RawReading,
) -> Option<(f64, BaselineSource)> {
    match sensor_baseline {
        Some(b) => Some((b.value_mm, b.source)),
        None => reading
            .distance_mm
            .map(|d| (d, BaselineSource::SelfReading)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(hour: u32, minute: u32, distance: Option<f64>) -> RawReading {
        RawReading::new(
            "s1",
            Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0).unwrap(),
            distance,
        )
    }

    #[test]
    fn test_night_median_preferred() {
        let readings = vec![
            reading(23, 0, Some(2000.0)),
            reading(23, 10, Some(2010.0)),
            reading(23, 20, Some(2020.0)),
            reading(12, 0, Some(1500.0)),
            reading(13, 0, Some(1500.0)),
        ];
        let config = FilterConfig::default();
        let baseline = estimate_baseline("s1", &readings, &config).unwrap();
        assert_eq!(baseline.value_mm, 2010.0);
        assert_eq!(baseline.source, BaselineSource::NightMedian);
    }

    #[test]
    fn test_falls_back_to_all_median() {
        let readings = vec![
            reading(10, 0, Some(1900.0)),
            reading(11, 0, Some(2000.0)),
            reading(12, 0, Some(2100.0)),
            reading(13, 0, Some(2200.0)),
        ];
        let config = FilterConfig::default();
        let baseline = estimate_baseline("s1", &readings, &config).unwrap();
        assert_eq!(baseline.value_mm, 2050.0);
        assert_eq!(baseline.source, BaselineSource::AllMedian);
    }

    #[test]
    fn test_no_distances_yields_none() {
        let readings = vec![reading(10, 0, None), reading(11, 0, None)];
        let config = FilterConfig::default();
        assert!(estimate_baseline("s1", &readings, &config).is_none());
    }

    #[test]
    fn test_self_reading_fallback_produces_zero_depth() {
        let r = reading(10, 0, Some(1234.0));
        let (value, source) = baseline_for_reading(None, &r).unwrap();
        assert_eq!(value, 1234.0);
        assert_eq!(source, BaselineSource::SelfReading);
    }

    #[test]
    fn test_early_morning_counts_as_night() {
        let readings = vec![
            reading(3, 0, Some(1990.0)),
            reading(4, 30, Some(2010.0)),
            reading(12, 0, Some(1000.0)),
        ];
        let config = FilterConfig::default();
        let baseline = estimate_baseline("s1", &readings, &config).unwrap();
        assert_eq!(baseline.value_mm, 2000.0);
        assert_eq!(baseline.source, BaselineSource::NightMedian);
    }
}
