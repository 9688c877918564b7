//! Batch orchestrator.
//!
//! Walks the table in order, geocodes every unresolved record, writes the
//! coordinates back in place and checkpoints on a fixed cadence. Requests are
//! strictly sequential and paced by a fixed delay.
//!
//! Cancellation is observed while a request is in flight and during the
//! pacing delay. A cancelled request's result is discarded; everything
//! resolved before it is kept and saved.

use std::time::Duration;

use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::app::{log_progress, log_table_summary};
use crate::checkpoint::{AddressTable, CheckpointGuard, CheckpointStore};
use crate::config::{millis, CHECKPOINT_EVERY, PROGRESS_EVERY, REQUEST_DELAY_MS};
use crate::error_handling::{CheckpointError, RunStats};
use crate::geocode::Geocoder;

/// Pacing and reporting cadence of the loop.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Pause after every processed record, errors included
    pub request_delay: Duration,
    /// Save the table every N processed records (0 disables)
    pub checkpoint_every: usize,
    /// Log a progress line every N processed records (0 disables)
    pub progress_every: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            request_delay: millis(REQUEST_DELAY_MS),
            checkpoint_every: CHECKPOINT_EVERY,
            progress_every: PROGRESS_EVERY,
        }
    }
}

/// Summary of one pass over the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Outcome tallies for the records processed in this run
    pub stats: RunStats,
    /// Records in the table
    pub total: usize,
    /// Records that were resolved before the run started
    pub already_resolved: usize,
    /// Records sent to the geocoder and accounted for
    pub processed: usize,
    /// Whether the run stopped on cancellation
    pub interrupted: bool,
}

fn is_due(count: usize, every: usize) -> bool {
    every > 0 && count % every == 0
}

/// Geocodes every unresolved record of `table`.
///
/// Resolved records are never passed to the geocoder, so a second run over
/// the saved table issues no requests. The table is saved through `store`
/// every `checkpoint_every` records and once more at the end, whether the
/// loop completed or was cancelled. The run tallies are logged after that
/// final save on every exit path, panics included.
///
/// # Errors
///
/// Only the final save can fail the run. Periodic checkpoint failures are
/// logged and the loop continues.
pub async fn run_batch<G: Geocoder>(
    table: &mut AddressTable,
    geocoder: &G,
    store: &CheckpointStore,
    settings: &BatchSettings,
    cancel: &CancellationToken,
) -> Result<BatchReport, CheckpointError> {
    let total = table.len();
    let already_resolved = table.resolved_count();
    let remaining = total - already_resolved;
    log_table_summary(total, already_resolved);

    let mut guard = CheckpointGuard::new(table, store);
    let mut processed = 0usize;

    for idx in 0..guard.len() {
        if guard.records()[idx].is_resolved() {
            continue;
        }
        if cancel.is_cancelled() {
            guard.interrupt();
            break;
        }

        let (address, region) = {
            let record = &guard.records()[idx];
            (record.address.clone(), record.region.clone())
        };

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                guard.interrupt();
                break;
            }
            outcome = geocoder.resolve(&address, &region) => outcome,
        };

        let (coordinates, status) = outcome.into_parts();
        if let Some(coordinates) = coordinates {
            guard.records_mut()[idx].set_coordinates(coordinates);
        }
        guard.record(&status);
        processed += 1;

        if is_due(processed, settings.progress_every) {
            log_progress(processed, remaining, &status, &region, &address);
        }
        if is_due(processed, settings.checkpoint_every) {
            match guard.checkpoint() {
                Ok(()) => info!("  -> Saved ({} records)", processed),
                Err(e) => warn!("Checkpoint after {} records failed: {}", processed, e),
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                guard.interrupt();
                break;
            }
            _ = tokio::time::sleep(settings.request_delay) => {}
        }
    }

    let interrupted = guard.is_interrupted();
    if interrupted {
        warn!("Interrupted after {} of {} records", processed, remaining);
    }

    // Reports the tallies whether or not the save succeeds
    let stats = guard.finish()?;
    info!("Table saved: {}", store.path().display());

    Ok(BatchReport {
        stats,
        total,
        already_resolved,
        processed,
        interrupted,
    })
}
