//! Process-level helpers used by the run wiring.
//!
//! This module provides progress logging, interruption handling and
//! statistics printing.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::{log_progress, log_table_summary};
pub use shutdown::spawn_signal_listener;
pub use statistics::print_run_statistics;
