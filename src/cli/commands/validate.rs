//! Validate command: replay readings through the streaming validator.
//!
//! Readings are sorted chronologically and fed one at a time through the
//! validator backed by the in-memory store, exactly as they would have been
//! validated at ingestion time. Each reading's verdict is written out with
//! its flood level; a summary reports valid/invalid counts and the worst
//! flood level seen.

use crate::app::adapters::jsonl;
use crate::app::models::{FloodLevel, RawReading};
use crate::app::services::streaming_validator::{MemoryReadingStore, StreamingValidator};
use crate::cli::args::ValidateArgs;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

use super::{create_progress_bar, resolve_config, setup_logging};

/// One output line per replayed reading
#[derive(Debug, Serialize)]
struct VerdictRecord {
    sensor_id: String,
    received_at: DateTime<Utc>,
    distance_mm: Option<f64>,
    is_valid: bool,
    z_score: Option<f64>,
    reason: String,
    final_depth_mm: Option<f64>,
    is_benchmark: bool,
    flood_level: FloodLevel,
}

/// Replay a JSON-lines readings file through the streaming validator
pub async fn run(args: ValidateArgs) -> Result<()> {
    setup_logging(&args.log_level, args.quiet)?;

    let config = resolve_config(args.config_path.as_deref())?;

    let mut readings: Vec<RawReading> = jsonl::read_records(&args.input_path)?;
    readings.sort_by_key(|r| r.received_at);
    info!(
        "Replaying {} readings from {}",
        readings.len(),
        args.input_path.display()
    );

    let progress_bar = if args.quiet || readings.is_empty() {
        None
    } else {
        Some(create_progress_bar(
            readings.len() as u64,
            "Validating readings",
        ))
    };

    let validator = StreamingValidator::new(MemoryReadingStore::new(), config.filters.clone());

    // Sensors whose calibration flag is pending (consumed by the first reading)
    let mut awaiting_calibration: HashSet<String> = HashSet::new();
    let mut calibrated_once: HashSet<String> = HashSet::new();

    let mut records = Vec::with_capacity(readings.len());
    let mut valid_count = 0usize;
    let mut invalid_count = 0usize;
    let mut benchmark_count = 0usize;
    let mut worst_level = FloodLevel::NoData;

    for reading in &readings {
        let awaiting = if args.calibrate_first {
            if calibrated_once.insert(reading.sensor_id.clone()) {
                awaiting_calibration.insert(reading.sensor_id.clone());
            }
            awaiting_calibration.contains(&reading.sensor_id)
        } else {
            false
        };

        let verdict = validator.validate(reading, awaiting).await?;
        if verdict.benchmark_captured {
            awaiting_calibration.remove(&reading.sensor_id);
            benchmark_count += 1;
        }
        validator.store().insert(reading, verdict.benchmark_captured)?;

        if verdict.validation.is_valid {
            valid_count += 1;
        } else {
            invalid_count += 1;
        }

        let flood_level = FloodLevel::from_depth(verdict.final_depth_mm);
        if flood_level > worst_level {
            worst_level = flood_level;
        }

        records.push(VerdictRecord {
            sensor_id: reading.sensor_id.clone(),
            received_at: reading.received_at,
            distance_mm: reading.distance_mm,
            is_valid: verdict.validation.is_valid,
            z_score: verdict.validation.z_score,
            reason: verdict.validation.reason.to_string(),
            final_depth_mm: verdict.final_depth_mm,
            is_benchmark: verdict.benchmark_captured,
            flood_level,
        });

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }
    if let Some(pb) = progress_bar {
        pb.finish_with_message("Validation complete");
    }

    jsonl::write_records(&args.output_path, &records)?;

    info!(
        "Validation summary: {} valid, {} invalid, {} benchmarks | worst flood level: {}",
        valid_count,
        invalid_count,
        benchmark_count,
        worst_level.label()
    );
    if worst_level.is_alert_worthy() {
        info!("Alert-worthy flood level observed: {}", worst_level.label());
    }
    info!("Wrote {} verdicts to {}", records.len(), args.output_path.display());

    Ok(())
}
