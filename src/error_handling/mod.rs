//! Error handling and run statistics.
//!
//! This module provides:
//! - Fatal error types (initialization, checkpoint I/O)
//! - Outcome categories for per-record geocoding results
//! - Run statistics accumulation
//!
//! Per-record failures never abort the batch; they are tallied here and
//! summarized at the end of the run.

mod stats;
mod types;

// Re-export public API
pub use stats::RunStats;
pub use types::{CheckpointError, InitializationError, OutcomeCategory};
