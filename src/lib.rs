//! FloodSense Processor Library
//!
//! A Rust library for cleaning ultrasonic flood-sensor telemetry and flagging
//! anomalous readings. Raw distance measurements arrive noisy, spike-prone and
//! occasionally obstructed; this library turns them into trustworthy
//! water-depth records.
//!
//! This library provides tools for:
//! - Estimating per-sensor baseline distances from nighttime medians
//! - Running the batch cleaning pipeline (noise floor, gradient spike, blip,
//!   box/plateau and z-score stages) over historical reading series
//! - Validating each incoming reading online against its rolling history and
//!   computing calibration-relative water depth
//! - Classifying water depths into flood severity levels
//! - Reading and writing JSON-lines reading files for the CLI surface

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod baseline;
        pub mod batch_pipeline;
        pub mod stats;
        pub mod streaming_validator;
    }
    pub mod adapters {
        pub mod jsonl;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FloodLevel, ProcessedReading, RawReading};
pub use app::services::batch_pipeline::FloodFilterPipeline;
pub use app::services::streaming_validator::StreamingValidator;
pub use config::Config;

/// Result type alias for the FloodSense processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for flood-sensor processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization error
    #[error("JSON error in '{context}': {message}")]
    Json {
        context: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Reading store error (benchmark or history lookup failed)
    #[error("Reading store error: {message}")]
    Store { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(
        context: impl Into<String>,
        message: impl Into<String>,
        source: Option<serde_json::Error>,
    ) -> Self {
        Self::Json {
            context: context.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a reading store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            context: "unknown".to_string(),
            message: "JSON (de)serialization failed".to_string(),
            source: Some(error),
        }
    }
}
