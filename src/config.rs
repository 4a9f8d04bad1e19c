//! Configuration management and validation.
//!
//! Provides the configuration structures injected into both cleaning engines.
//! Every tunable threshold lives here with its default taken from
//! [`crate::constants`]; neither engine embeds a literal.

use crate::constants::{
    DEFAULT_BATCH_Z_THRESHOLD, DEFAULT_BLIP_METRIC_THRESHOLD, DEFAULT_BLIP_MIN_DELTA_MM,
    DEFAULT_BOX_METRIC_THRESHOLD, DEFAULT_GRADIENT_THRESHOLD_MM_PER_MIN, DEFAULT_NIGHT_END_HOUR,
    DEFAULT_NIGHT_START_HOUR, DEFAULT_NOISE_FLOOR_MM, DEFAULT_STREAMING_WINDOW,
    DEFAULT_STREAMING_Z_THRESHOLD, DEFAULT_WATER_DEPTH_TOLERANCE_MM,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Tunable thresholds for the batch pipeline and streaming validator
///
/// The batch and streaming anomaly models are deliberately separate: the batch
/// pipeline scores per-sensor *depths* against their full-history sample
/// statistics, while the streaming validator scores raw *distances* against a
/// fixed rolling window with population statistics. The two sets of fields are
/// not interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Noise floor clamp threshold in mm
    pub noise_floor_mm: f64,

    /// Gradient spike rejection threshold in mm per minute
    pub gradient_threshold_mm_per_min: f64,

    /// Minimum rising edge for blip candidacy in mm
    pub blip_min_delta_mm: f64,

    /// Blip return-to-level metric threshold
    pub blip_metric_threshold: f64,

    /// Box/plateau relative deviation threshold
    pub box_metric_threshold: f64,

    /// Batch z-score anomaly threshold (sample statistics over depths)
    pub batch_z_threshold: f64,

    /// Streaming history window size in readings
    pub streaming_window: usize,

    /// Streaming z-score threshold (population statistics over distances)
    pub streaming_z_threshold: f64,

    /// Tolerance band around the calibration benchmark in mm
    pub water_depth_tolerance_mm: f64,

    /// UTC hour opening the nighttime baseline window (inclusive)
    pub night_start_hour: u32,

    /// UTC hour closing the nighttime baseline window (exclusive)
    pub night_end_hour: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            noise_floor_mm: DEFAULT_NOISE_FLOOR_MM,
            gradient_threshold_mm_per_min: DEFAULT_GRADIENT_THRESHOLD_MM_PER_MIN,
            blip_min_delta_mm: DEFAULT_BLIP_MIN_DELTA_MM,
            blip_metric_threshold: DEFAULT_BLIP_METRIC_THRESHOLD,
            box_metric_threshold: DEFAULT_BOX_METRIC_THRESHOLD,
            batch_z_threshold: DEFAULT_BATCH_Z_THRESHOLD,
            streaming_window: DEFAULT_STREAMING_WINDOW,
            streaming_z_threshold: DEFAULT_STREAMING_Z_THRESHOLD,
            water_depth_tolerance_mm: DEFAULT_WATER_DEPTH_TOLERANCE_MM,
            night_start_hour: DEFAULT_NIGHT_START_HOUR,
            night_end_hour: DEFAULT_NIGHT_END_HOUR,
        }
    }
}

impl FilterConfig {
    /// Validate threshold values, returning a configuration error on the
    /// first violation found
    pub fn validate(&self) -> Result<()> {
        if !self.noise_floor_mm.is_finite() || self.noise_floor_mm < 0.0 {
            return Err(Error::configuration(format!(
                "noise_floor_mm must be a non-negative finite value, got {}",
                self.noise_floor_mm
            )));
        }
        if !self.gradient_threshold_mm_per_min.is_finite()
            || self.gradient_threshold_mm_per_min <= 0.0
        {
            return Err(Error::configuration(format!(
                "gradient_threshold_mm_per_min must be positive, got {}",
                self.gradient_threshold_mm_per_min
            )));
        }
        if !self.blip_min_delta_mm.is_finite() || self.blip_min_delta_mm < 0.0 {
            return Err(Error::configuration(format!(
                "blip_min_delta_mm must be non-negative, got {}",
                self.blip_min_delta_mm
            )));
        }
        if !self.blip_metric_threshold.is_finite() || self.blip_metric_threshold <= 0.0 {
            return Err(Error::configuration(format!(
                "blip_metric_threshold must be positive, got {}",
                self.blip_metric_threshold
            )));
        }
        if !self.box_metric_threshold.is_finite() || self.box_metric_threshold <= 0.0 {
            return Err(Error::configuration(format!(
                "box_metric_threshold must be positive, got {}",
                self.box_metric_threshold
            )));
        }
        if !self.batch_z_threshold.is_finite() || self.batch_z_threshold <= 0.0 {
            return Err(Error::configuration(format!(
                "batch_z_threshold must be positive, got {}",
                self.batch_z_threshold
            )));
        }
        if self.streaming_window < 2 {
            return Err(Error::configuration(format!(
                "streaming_window must be at least 2, got {}",
                self.streaming_window
            )));
        }
        if !self.streaming_z_threshold.is_finite() || self.streaming_z_threshold <= 0.0 {
            return Err(Error::configuration(format!(
                "streaming_z_threshold must be positive, got {}",
                self.streaming_z_threshold
            )));
        }
        if !self.water_depth_tolerance_mm.is_finite() || self.water_depth_tolerance_mm < 0.0 {
            return Err(Error::configuration(format!(
                "water_depth_tolerance_mm must be non-negative, got {}",
                self.water_depth_tolerance_mm
            )));
        }
        if self.night_start_hour >= 24 || self.night_end_hour >= 24 {
            return Err(Error::configuration(format!(
                "night window hours must be within 0..24, got [{}, {})",
                self.night_start_hour, self.night_end_hour
            )));
        }
        Ok(())
    }
}

/// Performance settings for the CLI batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of sensors processed concurrently
    pub parallel_workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_workers: num_cpus::get_physical(),
        }
    }
}

/// Global configuration for FloodSense processing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter thresholds shared by both engines
    pub filters: FilterConfig,

    /// Performance settings
    pub performance: PerformanceConfig,
}

impl Config {
    /// Load configuration from a JSON file and validate it
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read config file '{}'", path.display()), e))?;
        let config: Config = serde_json::from_str(&contents).map_err(|e| {
            Error::json(
                path.display().to_string(),
                "failed to parse configuration",
                Some(e),
            )
        })?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> Result<()> {
        self.filters.validate()?;
        if self.performance.parallel_workers == 0 {
            return Err(Error::configuration(
                "performance.parallel_workers must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.filters.noise_floor_mm, 10.0);
        assert_eq!(config.filters.gradient_threshold_mm_per_min, 254.0);
        assert_eq!(config.filters.streaming_window, 15);
        assert_eq!(config.filters.streaming_z_threshold, 3.0);
        assert_eq!(config.filters.batch_z_threshold, 2.0);
    }

    #[test]
    fn test_invalid_thresholds_are_rejected() {
        let mut filters = FilterConfig::default();
        filters.gradient_threshold_mm_per_min = 0.0;
        assert!(filters.validate().is_err());

        let mut filters = FilterConfig::default();
        filters.streaming_window = 1;
        assert!(filters.validate().is_err());

        let mut filters = FilterConfig::default();
        filters.night_start_hour = 24;
        assert!(filters.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"filters": {"noise_floor_mm": 5.0}}"#).unwrap();
        assert_eq!(config.filters.noise_floor_mm, 5.0);
        assert_eq!(config.filters.gradient_threshold_mm_per_min, 254.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = Config::default();
        config.performance.parallel_workers = 0;
        assert!(config.validate().is_err());
    }
}
