//! Application constants for the FloodSense processor
//!
//! This module contains the default tuning values for both cleaning engines,
//! flood severity thresholds, and small helpers used throughout the
//! application. Every threshold here is a *default*: the engines receive their
//! actual values through [`crate::config::FilterConfig`], never from literals.

// =============================================================================
// Batch Cleaning Pipeline Defaults
// =============================================================================

/// Depths below this are clamped to zero rather than treated as signal (mm)
pub const DEFAULT_NOISE_FLOOR_MM: f64 = 10.0;

/// Maximum plausible depth change between accepted points (mm per minute)
pub const DEFAULT_GRADIENT_THRESHOLD_MM_PER_MIN: f64 = 254.0;

/// Minimum rising edge for a triplet to qualify as a blip candidate (mm)
pub const DEFAULT_BLIP_MIN_DELTA_MM: f64 = 2.0;

/// Return-to-level ratio below which the middle point is a blip
pub const DEFAULT_BLIP_METRIC_THRESHOLD: f64 = 0.1;

/// Relative deviation within which a plateau extends (parked-object detection)
pub const DEFAULT_BOX_METRIC_THRESHOLD: f64 = 0.1;

/// Batch z-score anomaly threshold over per-sensor cleaned depths
pub const DEFAULT_BATCH_Z_THRESHOLD: f64 = 2.0;

// =============================================================================
// Streaming Validator Defaults
// =============================================================================

/// Number of prior readings considered by the streaming z-score check
pub const DEFAULT_STREAMING_WINDOW: usize = 15;

/// Streaming z-score threshold; readings at the boundary are still valid
pub const DEFAULT_STREAMING_Z_THRESHOLD: f64 = 3.0;

/// Depths within this band of the benchmark are reported as exactly zero (mm)
pub const DEFAULT_WATER_DEPTH_TOLERANCE_MM: f64 = 10.0;

// =============================================================================
// Baseline Estimation Defaults
// =============================================================================

/// UTC hour at which the nighttime window opens (inclusive)
pub const DEFAULT_NIGHT_START_HOUR: u32 = 22;

/// UTC hour at which the nighttime window closes (exclusive)
pub const DEFAULT_NIGHT_END_HOUR: u32 = 5;

// =============================================================================
// Flood Severity Thresholds
// =============================================================================

/// Flood level thresholds in mm of water depth
pub mod flood_levels {
    /// Below this depth there is no flooding
    pub const LOW_MM: f64 = 10.0;

    /// Low flooding band upper bound
    pub const MODERATE_MM: f64 = 50.0;

    /// Moderate flooding band upper bound
    pub const MAJOR_MM: f64 = 150.0;

    /// Major flooding band upper bound; beyond is extreme
    pub const EXTREME_MM: f64 = 300.0;
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Check whether a UTC hour falls inside the nighttime window
///
/// The window wraps midnight: `[start, 24) ∪ [0, end)`. With the defaults
/// this is 22:00–05:00 UTC.
pub fn is_night_hour(hour: u32, night_start: u32, night_end: u32) -> bool {
    hour >= night_start || hour < night_end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_window_wraps_midnight() {
        assert!(is_night_hour(22, DEFAULT_NIGHT_START_HOUR, DEFAULT_NIGHT_END_HOUR));
        assert!(is_night_hour(23, DEFAULT_NIGHT_START_HOUR, DEFAULT_NIGHT_END_HOUR));
        assert!(is_night_hour(0, DEFAULT_NIGHT_START_HOUR, DEFAULT_NIGHT_END_HOUR));
        assert!(is_night_hour(4, DEFAULT_NIGHT_START_HOUR, DEFAULT_NIGHT_END_HOUR));
    }

    #[test]
    fn test_day_hours_are_not_night() {
        assert!(!is_night_hour(5, DEFAULT_NIGHT_START_HOUR, DEFAULT_NIGHT_END_HOUR));
        assert!(!is_night_hour(12, DEFAULT_NIGHT_START_HOUR, DEFAULT_NIGHT_END_HOUR));
        assert!(!is_night_hour(21, DEFAULT_NIGHT_START_HOUR, DEFAULT_NIGHT_END_HOUR));
    }

    #[test]
    fn test_flood_level_thresholds_are_ordered() {
        assert!(flood_levels::LOW_MM < flood_levels::MODERATE_MM);
        assert!(flood_levels::MODERATE_MM < flood_levels::MAJOR_MM);
        assert!(flood_levels::MAJOR_MM < flood_levels::EXTREME_MM);
    }
}
