//! Scoped ownership of the working table with guaranteed write-back.

use std::ops::{Deref, DerefMut};

use log::{error, warn};

use crate::app::print_run_statistics;
use crate::error_handling::{CheckpointError, RunStats};
use crate::geocode::GeocodeStatus;

use super::{AddressTable, CheckpointStore};

/// Receives the run tallies once the final save has been attempted.
pub type StatsReporter = fn(&RunStats, bool);

/// Exclusive handle on the table and the run counters for the duration of
/// a run.
///
/// [`CheckpointGuard::finish`] performs the final save, reports the tallies
/// and returns the save result. If the guard is dropped without `finish`
/// (a panic in the loop, or the run future being dropped mid-await) the
/// table is saved and the tallies are reported from `Drop`, as an
/// interrupted run.
pub struct CheckpointGuard<'a> {
    table: &'a mut AddressTable,
    store: &'a CheckpointStore,
    stats: RunStats,
    interrupted: bool,
    reporter: StatsReporter,
    armed: bool,
}

impl<'a> CheckpointGuard<'a> {
    pub fn new(table: &'a mut AddressTable, store: &'a CheckpointStore) -> Self {
        Self::with_reporter(table, store, print_run_statistics)
    }

    /// Like [`CheckpointGuard::new`] with a custom tally sink.
    pub fn with_reporter(
        table: &'a mut AddressTable,
        store: &'a CheckpointStore,
        reporter: StatsReporter,
    ) -> Self {
        Self {
            table,
            store,
            stats: RunStats::new(),
            interrupted: false,
            reporter,
            armed: true,
        }
    }

    /// Accounts for one processed record.
    pub fn record(&mut self, status: &GeocodeStatus) {
        self.stats.record(status);
    }

    /// Marks the run as stopped by cancellation.
    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Intermediate save; the guard stays armed.
    pub fn checkpoint(&self) -> Result<(), CheckpointError> {
        self.store.save(&*self.table)
    }

    /// Final save, then the tally report.
    ///
    /// The tallies are reported even when the save fails.
    pub fn finish(mut self) -> Result<RunStats, CheckpointError> {
        self.armed = false;
        let saved = self.store.save(&*self.table);
        (self.reporter)(&self.stats, self.interrupted);
        saved.map(|()| self.stats)
    }
}

impl Deref for CheckpointGuard<'_> {
    type Target = AddressTable;

    fn deref(&self) -> &AddressTable {
        &*self.table
    }
}

impl DerefMut for CheckpointGuard<'_> {
    fn deref_mut(&mut self) -> &mut AddressTable {
        &mut *self.table
    }
}

impl Drop for CheckpointGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.store.save(&*self.table) {
            Ok(()) => warn!(
                "Run ended abnormally; table saved to {}",
                self.store.path().display()
            ),
            Err(e) => error!("Run ended abnormally and the table could not be saved: {}", e),
        }
        (self.reporter)(&self.stats, true);
    }
}
