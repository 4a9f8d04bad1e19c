//! Streaming validation of incoming sensor readings
//!
//! The streaming validator runs once per newly arrived reading, independently
//! of the batch pipeline, and answers three questions at ingestion time:
//!
//! - Is this reading the sensor's calibration benchmark?
//! - How deep is the water relative to the benchmark?
//! - Is the reading statistically plausible against its recent history?
//!
//! The module is organized into:
//! - [`validator`] - The [`StreamingValidator`] engine
//! - [`depth`] - Benchmark-relative water depth with a tolerance band
//! - [`store`] - The [`ReadingStore`] seam plus an in-memory replay store
//!
//! The batch pipeline's z-score stage and this validator are independent,
//! non-reconciled anomaly models; they share only the statistics utility.

pub mod depth;
pub mod store;
pub mod validator;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use depth::water_depth;
pub use store::{MemoryReadingStore, ReadingStore};
pub use validator::StreamingValidator;
