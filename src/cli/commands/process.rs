//! Batch process command: clean a readings file sensor by sensor.
//!
//! Independent sensors share no state, so the pipeline runs per sensor on a
//! bounded pool of blocking workers and the results are merged afterwards.

use crate::app::adapters::jsonl;
use crate::app::models::{ProcessedReading, RawReading};
use crate::app::services::batch_pipeline::{FloodFilterPipeline, PipelineStats};
use crate::cli::args::ProcessArgs;
use crate::{Error, Result};
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use tracing::info;

use super::{create_progress_bar, resolve_config, setup_logging};

/// Run the batch cleaning pipeline over a JSON-lines readings file
pub async fn run(args: ProcessArgs) -> Result<()> {
    setup_logging(&args.log_level, args.quiet)?;

    let config = resolve_config(args.config_path.as_deref())?;
    let workers = args
        .workers
        .unwrap_or(config.performance.parallel_workers)
        .max(1);

    let start_time = std::time::Instant::now();
    let readings: Vec<RawReading> = jsonl::read_records(&args.input_path)?;
    info!(
        "Loaded {} readings from {}",
        readings.len(),
        args.input_path.display()
    );

    // Split per sensor; each sensor is an independent pipeline run
    let mut by_sensor: BTreeMap<String, Vec<RawReading>> = BTreeMap::new();
    for reading in readings {
        by_sensor
            .entry(reading.sensor_id.clone())
            .or_default()
            .push(reading);
    }
    let sensor_count = by_sensor.len();
    info!("Processing {} sensors with {} workers", sensor_count, workers);

    let progress_bar = if args.quiet || sensor_count == 0 {
        None
    } else {
        Some(create_progress_bar(
            sensor_count as u64,
            "Cleaning sensors",
        ))
    };

    let pipeline = FloodFilterPipeline::new(config.filters.clone());
    let mut sensor_results = stream::iter(by_sensor.into_values().map(|sensor_readings| {
        let pipeline = pipeline.clone();
        tokio::task::spawn_blocking(move || pipeline.process_sensor(sensor_readings))
    }))
    .buffer_unordered(workers)
    .collect::<Vec<_>>()
    .await;

    let mut totals = PipelineStats::new();
    let mut processed: Vec<ProcessedReading> = Vec::new();
    for joined in sensor_results.drain(..) {
        let result =
            joined.map_err(|e| Error::processing_interrupted(format!("worker failed: {e}")))?;
        totals.merge(&result.stats);
        processed.extend(result.readings);
        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }
    if let Some(pb) = progress_bar {
        pb.finish_with_message(format!("Cleaned {} sensors", sensor_count));
    }

    // Merge back into global time order for output
    processed.sort_by_key(|r| r.received_at);

    let output: Vec<&ProcessedReading> = if args.all_records {
        processed.iter().collect()
    } else {
        processed.iter().filter(|r| r.is_clean()).collect()
    };
    jsonl::write_records(&args.output_path, &output)?;

    info!("{}", totals.summary());
    info!(
        "Wrote {} records to {} in {:.2}s",
        output.len(),
        args.output_path.display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
