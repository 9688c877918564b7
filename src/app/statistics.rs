//! Run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{OutcomeCategory, RunStats};

/// Prints the outcome tallies of a run.
///
/// Called on every exit path of the batch, including interruption.
pub fn print_run_statistics(stats: &RunStats, interrupted: bool) {
    if interrupted {
        info!("Run interrupted; partial results:");
    } else {
        info!("Results:");
    }
    for category in OutcomeCategory::iter() {
        info!("   {}: {}", category.as_str(), stats.get(category));
    }
}
