//! Progress logging utilities.

use log::info;

use crate::config::MAX_PROGRESS_ADDRESS_CHARS;
use crate::geocode::GeocodeStatus;
use crate::utils::truncate_chars;

/// Logs how much of the table is already geocoded before the loop starts.
pub fn log_table_summary(total: usize, already_resolved: usize) {
    info!("Total records: {}", total);
    info!("Already geocoded: {}", already_resolved);
    info!("Remaining: {}", total.saturating_sub(already_resolved));
}

/// Logs one progress line: `[processed/remaining] status: region, address...`
pub fn log_progress(
    processed: usize,
    remaining: usize,
    status: &GeocodeStatus,
    region: &str,
    address: &str,
) {
    info!("{}", progress_line(processed, remaining, status, region, address));
}

fn progress_line(
    processed: usize,
    remaining: usize,
    status: &GeocodeStatus,
    region: &str,
    address: &str,
) -> String {
    format!(
        "[{}/{}] {}: {}, {}...",
        processed,
        remaining,
        status,
        region,
        truncate_chars(address, MAX_PROGRESS_ADDRESS_CHARS)
    )
}
