//! Calibration-relative water depth computation.

use crate::app::models::WaterDepthResult;

/// Compute water depth from a benchmark and a current distance
///
/// Depth is benchmark minus current: a positive value means the water surface
/// moved closer to the sensor. Raw depths inside the tolerance band collapse
/// to exactly zero so jitter around the benchmark never reads as standing
/// water. Returns `None` without a benchmark or a current distance.
pub fn water_depth(
    benchmark_mm: Option<f64>,
    current_mm: Option<f64>,
    tolerance_mm: f64,
) -> Option<WaterDepthResult> {
    let benchmark_mm = benchmark_mm?;
    let current_mm = current_mm?;

    let raw_depth_mm = benchmark_mm - current_mm;
    let final_depth_mm = if raw_depth_mm.abs() <= tolerance_mm {
        0.0
    } else {
        raw_depth_mm
    };

    Some(WaterDepthResult {
        benchmark_mm,
        current_mm,
        raw_depth_mm,
        final_depth_mm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_tolerance_collapses_to_zero() {
        let result = water_depth(Some(500.0), Some(495.0), 10.0).unwrap();
        assert_eq!(result.raw_depth_mm, 5.0);
        assert_eq!(result.final_depth_mm, 0.0);
    }

    #[test]
    fn test_negative_drift_within_tolerance() {
        let result = water_depth(Some(500.0), Some(508.0), 10.0).unwrap();
        assert_eq!(result.raw_depth_mm, -8.0);
        assert_eq!(result.final_depth_mm, 0.0);
    }

    #[test]
    fn test_beyond_tolerance_keeps_raw_depth() {
        let result = water_depth(Some(500.0), Some(400.0), 10.0).unwrap();
        assert_eq!(result.raw_depth_mm, 100.0);
        assert_eq!(result.final_depth_mm, 100.0);
    }

    #[test]
    fn test_boundary_is_inside_tolerance() {
        let result = water_depth(Some(500.0), Some(490.0), 10.0).unwrap();
        assert_eq!(result.final_depth_mm, 0.0);
    }

    #[test]
    fn test_missing_inputs_yield_none() {
        assert!(water_depth(None, Some(500.0), 10.0).is_none());
        assert!(water_depth(Some(500.0), None, 10.0).is_none());
    }
}
