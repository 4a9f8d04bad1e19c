//! Command-line argument definitions for the FloodSense processor
//!
//! Defines the complete CLI interface using the clap derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the FloodSense flood-sensor data processor
///
/// Cleans ultrasonic flood-sensor telemetry: the `process` command runs the
/// batch cleaning pipeline over historical readings, and the `validate`
/// command replays readings through the streaming validator.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "floodsense-processor",
    version,
    about = "Clean flood-sensor telemetry and flag anomalous readings",
    long_about = "Processes raw ultrasonic distance telemetry from flood sensors into \
                  trustworthy water-depth measurements. The batch pipeline chains noise-floor, \
                  gradient-spike, blip, box/plateau, and z-score filters over historical series; \
                  the streaming validator classifies readings one at a time against their \
                  rolling history and computes calibration-relative water depth."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the FloodSense processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the batch cleaning pipeline over a readings file
    Process(ProcessArgs),
    /// Replay readings through the streaming validator
    Validate(ValidateArgs),
}

/// Arguments for the process command (batch cleaning)
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input JSON-lines file of raw readings
    ///
    /// One reading per line: {"sensor_id", "received_at", "distance_mm"}.
    /// Readings from multiple sensors may be mixed freely.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Input JSON-lines file of raw readings"
    )]
    pub input_path: PathBuf,

    /// Output JSON-lines file for cleaned readings
    ///
    /// By default only the clean set (valid, non-anomalous) is written;
    /// use --all-records for every processed record including rejections.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output JSON-lines file for cleaned readings"
    )]
    pub output_path: PathBuf,

    /// Optional JSON configuration file overriding filter thresholds
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "JSON configuration file overriding filter thresholds"
    )]
    pub config_path: Option<PathBuf>,

    /// Write every processed record, not just the clean set
    #[arg(long = "all-records", help = "Write every processed record, not just the clean set")]
    pub all_records: bool,

    /// Number of sensors to process concurrently
    #[arg(
        short = 'w',
        long = "workers",
        value_name = "N",
        help = "Number of sensors to process concurrently (default: physical cores)"
    )]
    pub workers: Option<usize>,

    /// Logging verbosity (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        help = "Logging verbosity"
    )]
    pub log_level: String,

    /// Suppress progress bars and non-essential output
    #[arg(short = 'q', long = "quiet", help = "Suppress progress bars and non-essential output")]
    pub quiet: bool,
}

/// Arguments for the validate command (streaming replay)
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Input JSON-lines file of raw readings
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Input JSON-lines file of raw readings"
    )]
    pub input_path: PathBuf,

    /// Output JSON-lines file for per-reading verdicts
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output JSON-lines file for per-reading verdicts"
    )]
    pub output_path: PathBuf,

    /// Optional JSON configuration file overriding filter thresholds
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "JSON configuration file overriding filter thresholds"
    )]
    pub config_path: Option<PathBuf>,

    /// Treat each sensor's first reading as its calibration benchmark
    #[arg(
        long = "calibrate-first",
        help = "Treat each sensor's first reading as its calibration benchmark"
    )]
    pub calibrate_first: bool,

    /// Logging verbosity (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        help = "Logging verbosity"
    )]
    pub log_level: String,

    /// Suppress progress bars and non-essential output
    #[arg(short = 'q', long = "quiet", help = "Suppress progress bars and non-essential output")]
    pub quiet: bool,
}
