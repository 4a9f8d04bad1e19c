//! Batch cleaning pipeline for flood-sensor reading series
//!
//! This module turns a per-sensor time series of raw ultrasonic distances
//! into cleaned depth records through five ordered filter stages. Each stage
//! consumes the cumulative validity state left by the previous one:
//!
//! 1. **Initialization**: depth relative to the sensor's baseline
//! 2. [`noise_floor`]: clamp sub-threshold depths to zero (no rejection)
//! 3. [`gradient`]: reject implausibly fast changes between accepted points
//! 4. [`blip`]: reject transient 3-point spike-and-return patterns
//! 5. [`box_filter`]: reject parked-object plateaus
//! 6. [`zscore`]: flag per-sensor statistical outliers (sample statistics)
//!
//! The externally visible "clean" set is every record that is still valid and
//! not a z-score anomaly. Rejected records keep their flags but lose their
//! depth, so downstream consumers can tell *why* a record disappeared.

pub mod blip;
pub mod box_filter;
pub mod gradient;
pub mod noise_floor;
pub mod pipeline;
pub mod stats;
pub mod zscore;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use pipeline::FloodFilterPipeline;
pub use stats::{PipelineResult, PipelineStats};
