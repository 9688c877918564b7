//! Per-run outcome counters.

use crate::geocode::GeocodeStatus;

use super::types::OutcomeCategory;

/// Outcome counters for one run of the batch.
///
/// Process-local: reset on every run and never written to the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Records that received coordinates (low-precision included)
    pub ok: usize,
    /// Records the provider could not place
    pub not_found: usize,
    /// Subset of `ok` whose match was approximate
    pub low_precision: usize,
    /// Everything else: transport, parse and exhaustion failures
    pub error: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one processed record.
    pub fn record(&mut self, status: &GeocodeStatus) {
        match status.category() {
            OutcomeCategory::Ok => self.ok += 1,
            OutcomeCategory::LowPrecision => {
                self.ok += 1;
                self.low_precision += 1;
            }
            OutcomeCategory::NotFound => self.not_found += 1,
            OutcomeCategory::Error => self.error += 1,
        }
    }

    /// Number of records accounted for.
    ///
    /// `low_precision` is a subset of `ok` and is not added again.
    pub fn total(&self) -> usize {
        self.ok + self.not_found + self.error
    }

    /// Counter for a category, as shown in the run summary.
    pub fn get(&self, category: OutcomeCategory) -> usize {
        match category {
            OutcomeCategory::Ok => self.ok,
            OutcomeCategory::LowPrecision => self.low_precision,
            OutcomeCategory::NotFound => self.not_found,
            OutcomeCategory::Error => self.error,
        }
    }
}
