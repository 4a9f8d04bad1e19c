//! Online per-reading validation engine.
//!
//! Invoked once per newly arrived reading, synchronously in the ingestion
//! path. Produces a validity verdict, an absolute z-score against the
//! sensor's rolling distance window, and the calibration-relative water depth
//! to store on the reading. Nothing here is retroactively recomputed.

use crate::Result;
use crate::app::models::{
    IngestVerdict, RawReading, StreamingValidationResult, ValidationReason,
};
use crate::app::services::stats;
use crate::config::FilterConfig;
use tracing::{debug, info};

use super::depth::water_depth;
use super::store::ReadingStore;

/// Streaming validator for incoming sensor readings
///
/// Holds the filter configuration and a handle to the reading store. The
/// anomaly model here is deliberately distinct from the batch pipeline's:
/// raw distances instead of depths, a fixed rolling window instead of full
/// history, population variance instead of sample variance, and a threshold
/// of 3.0 instead of 2.0.
///
/// # Concurrency
///
/// The benchmark and history lookups and the caller's subsequent write are
/// not transactional. Two readings for the same sensor ingested concurrently
/// can race on which counts as "previous" for depth and validity purposes;
/// this is an accepted eventual-consistency risk, not a correctness
/// guarantee.
#[derive(Debug)]
pub struct StreamingValidator<S: ReadingStore> {
    store: S,
    config: FilterConfig,
}

impl<S: ReadingStore> StreamingValidator<S> {
    /// Create a new validator over a reading store
    pub fn new(store: S, config: FilterConfig) -> Self {
        Self { store, config }
    }

    /// Access the underlying reading store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate one incoming reading
    ///
    /// `awaiting_calibration` is the sensor's external calibration flag. When
    /// set, this reading becomes the benchmark: water depth is forced to
    /// zero, validity is forced to true, and no further checks run; the
    /// returned verdict asks the caller to clear the flag. Store failures
    /// propagate unmodified.
    pub async fn validate(
        &self,
        reading: &RawReading,
        awaiting_calibration: bool,
    ) -> Result<IngestVerdict> {
        if awaiting_calibration {
            info!(
                sensor_id = %reading.sensor_id,
                distance_mm = ?reading.distance_mm,
                "capturing calibration benchmark"
            );
            // The benchmark defines zero depth regardless of its distance
            return Ok(IngestVerdict {
                validation: StreamingValidationResult {
                    is_valid: true,
                    z_score: None,
                    reason: ValidationReason::Benchmark,
                },
                water_depth: water_depth(reading.distance_mm, reading.distance_mm, 0.0),
                final_depth_mm: Some(0.0),
                benchmark_captured: true,
            });
        }

        let benchmark = self.store.benchmark_distance(&reading.sensor_id).await?;
        let water_depth_result = water_depth(
            benchmark,
            reading.distance_mm,
            self.config.water_depth_tolerance_mm,
        );
        let final_depth_mm = water_depth_result.as_ref().map(|d| d.final_depth_mm);

        let validation = self.check_validity(reading).await?;

        debug!(
            sensor_id = %reading.sensor_id,
            is_valid = validation.is_valid,
            z_score = ?validation.z_score,
            final_depth_mm = ?final_depth_mm,
            "streaming validation complete"
        );

        Ok(IngestVerdict {
            validation,
            water_depth: water_depth_result,
            final_depth_mm,
            benchmark_captured: false,
        })
    }

    /// Score the reading's distance against its rolling history window
    ///
    /// Missing distance and insufficient history both default to valid;
    /// ingestion is never blocked by lack of data.
    async fn check_validity(&self, reading: &RawReading) -> Result<StreamingValidationResult> {
        let Some(current) = reading.distance_mm else {
            return Ok(StreamingValidationResult {
                is_valid: true,
                z_score: None,
                reason: ValidationReason::MissingDistance,
            });
        };

        let window = self.config.streaming_window;
        let history = self
            .store
            .recent_distances(&reading.sensor_id, window)
            .await?;

        if history.len() < window {
            return Ok(StreamingValidationResult {
                is_valid: true,
                z_score: None,
                reason: ValidationReason::InsufficientHistory {
                    available: history.len(),
                    required: window,
                },
            });
        }

        // Population statistics over exactly the window's raw distances
        let mean = stats::mean(&history).unwrap_or(current);
        let std = stats::population_variance(&history)
            .unwrap_or(0.0)
            .sqrt();
        let z = stats::z_score(current, mean, std);

        // Inclusive boundary: a score exactly at the threshold is still valid
        if z <= self.config.streaming_z_threshold {
            Ok(StreamingValidationResult {
                is_valid: true,
                z_score: Some(z),
                reason: ValidationReason::WithinThreshold { z_score: z },
            })
        } else {
            Ok(StreamingValidationResult {
                is_valid: false,
                z_score: Some(z),
                reason: ValidationReason::Anomalous { z_score: z },
            })
        }
    }
}
