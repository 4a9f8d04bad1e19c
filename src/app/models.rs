//! Core data structures for flood-sensor processing.
//!
//! Defines raw and processed reading records, baseline metadata, streaming
//! verdict types, and flood severity classification used throughout the
//! library.

use crate::constants::flood_levels;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw ultrasonic reading as produced by ingestion
///
/// Immutable and append-only. A missing distance means the device reported a
/// frame without a usable measurement; such readings are stored but excluded
/// from all statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    /// Sensor identifier
    pub sensor_id: String,
    /// Receive time (UTC)
    pub received_at: DateTime<Utc>,
    /// Raw ultrasonic distance in mm, if the frame carried one
    pub distance_mm: Option<f64>,
}

impl RawReading {
    pub fn new(
        sensor_id: impl Into<String>,
        received_at: DateTime<Utc>,
        distance_mm: Option<f64>,
    ) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            received_at,
            distance_mm,
        }
    }
}

/// How a sensor's baseline distance was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaselineSource {
    /// Median of nighttime distances (preferred)
    NightMedian,
    /// Median of all distances (no nighttime readings available)
    AllMedian,
    /// The reading's own distance (no history at all, zero depth)
    SelfReading,
}

/// A sensor's reference "no-water" distance
///
/// Recomputed in full on every batch run; never persisted incrementally and
/// never shared across sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub sensor_id: String,
    pub value_mm: f64,
    pub source: BaselineSource,
}

/// A reading after the batch cleaning pipeline
///
/// Invariant: `depth_mm` is `None` exactly when the gradient, blip, or box
/// stage rejected the record. The noise-floor clamp sets `depth_mm` to zero
/// but leaves the record valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedReading {
    pub sensor_id: String,
    pub received_at: DateTime<Utc>,
    /// Raw distance this record was derived from (mm)
    pub distance_mm: f64,
    /// Baseline used for depth computation (mm)
    pub baseline_mm: f64,
    /// Where the baseline came from
    pub baseline_source: BaselineSource,
    /// Cleaned water depth (mm); `None` if rejected by a filter stage
    pub depth_mm: Option<f64>,
    /// True while no rejecting stage has fired
    pub nyc_valid: bool,

    // Filter stage flags
    pub noise_floor_applied: bool,
    pub filtered_gradient: bool,
    pub filtered_blip: bool,
    pub filtered_box: bool,
    /// Rate against the previously accepted point (mm/min), when computable
    pub gradient_rate_mm_per_min: Option<f64>,

    /// Signed batch z-score over the sensor's surviving depths
    pub z_score: Option<f64>,
    /// True when `|z_score|` exceeds the batch threshold
    pub z_anomaly: bool,
}

impl ProcessedReading {
    /// Create the initial processed record for a reading: depth relative to
    /// baseline, valid, no flags set
    pub fn init(
        sensor_id: impl Into<String>,
        received_at: DateTime<Utc>,
        distance_mm: f64,
        baseline_mm: f64,
        baseline_source: BaselineSource,
    ) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            received_at,
            distance_mm,
            baseline_mm,
            baseline_source,
            depth_mm: Some(baseline_mm - distance_mm),
            nyc_valid: true,
            noise_floor_applied: false,
            filtered_gradient: false,
            filtered_blip: false,
            filtered_box: false,
            gradient_rate_mm_per_min: None,
            z_score: None,
            z_anomaly: false,
        }
    }

    /// Whether the record belongs to the externally visible clean set
    pub fn is_clean(&self) -> bool {
        self.nyc_valid && !self.z_anomaly
    }
}

/// Why the streaming validator reached its verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationReason {
    /// Calibration reading; valid by definition
    Benchmark,
    /// No distance value; validation skipped
    MissingDistance,
    /// Not enough history to score the reading
    InsufficientHistory { available: usize, required: usize },
    /// Scored within the streaming threshold
    WithinThreshold { z_score: f64 },
    /// Scored beyond the streaming threshold
    Anomalous { z_score: f64 },
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Benchmark => write!(f, "benchmark/calibration reading, valid by definition"),
            Self::MissingDistance => write!(f, "no distance value, validation skipped"),
            Self::InsufficientHistory {
                available,
                required,
            } => write!(
                f,
                "insufficient history ({available}/{required}), defaulting to valid"
            ),
            Self::WithinThreshold { z_score } => {
                write!(f, "z-score {z_score:.2} within threshold, valid reading")
            }
            Self::Anomalous { z_score } => {
                write!(f, "z-score {z_score:.2} over threshold, anomaly detected")
            }
        }
    }
}

/// Outcome of the streaming validity check for one reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingValidationResult {
    pub is_valid: bool,
    /// Absolute z-score against the rolling distance window, when computed
    pub z_score: Option<f64>,
    pub reason: ValidationReason,
}

/// Calibration-relative water depth for one reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterDepthResult {
    /// The benchmark reading's distance (mm)
    pub benchmark_mm: f64,
    /// The current reading's distance (mm)
    pub current_mm: f64,
    /// Benchmark minus current; positive means water rose toward the sensor
    pub raw_depth_mm: f64,
    /// Zero when the raw depth is inside the tolerance band, else the raw depth
    pub final_depth_mm: f64,
}

/// Everything the streaming validator hands back to the ingestion caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestVerdict {
    pub validation: StreamingValidationResult,
    /// Depth relative to the calibration benchmark; absent without a benchmark
    pub water_depth: Option<WaterDepthResult>,
    /// Water depth to store on the reading (forced to zero for benchmarks)
    pub final_depth_mm: Option<f64>,
    /// True when this reading consumed the sensor's awaiting-calibration flag;
    /// the caller clears the flag and marks the stored reading as benchmark
    pub benchmark_captured: bool,
}

/// Flood severity classified from a final water depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloodLevel {
    NoData,
    NoFlooding,
    Low,
    Moderate,
    Major,
    Extreme,
}

impl FloodLevel {
    /// Classify a water depth in mm
    pub fn from_depth(depth_mm: Option<f64>) -> Self {
        match depth_mm {
            None => Self::NoData,
            Some(d) if d < flood_levels::LOW_MM => Self::NoFlooding,
            Some(d) if d < flood_levels::MODERATE_MM => Self::Low,
            Some(d) if d < flood_levels::MAJOR_MM => Self::Moderate,
            Some(d) if d < flood_levels::EXTREME_MM => Self::Major,
            Some(_) => Self::Extreme,
        }
    }

    /// Human-readable label matching the dashboard vocabulary
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoData => "No Data",
            Self::NoFlooding => "No Flooding",
            Self::Low => "Low Flooding",
            Self::Moderate => "Moderate Flooding",
            Self::Major => "Major Flooding",
            Self::Extreme => "Extreme Flooding",
        }
    }

    /// Moderate or worse is alert-worthy
    pub fn is_alert_worthy(&self) -> bool {
        *self >= Self::Moderate
    }
}
