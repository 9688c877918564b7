//! End-to-end wiring of one geocoding run.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::batch::run_batch;
use crate::checkpoint::CheckpointStore;
use crate::config::{Config, API_KEY_ENV};
use crate::error_handling::{InitializationError, RunStats};
use crate::geocode::YandexGeocoder;

/// Results of a geocoding run.
#[derive(Debug, Clone)]
pub struct GeocodeReport {
    /// Table that was updated
    pub path: PathBuf,
    /// Records in the table
    pub total: usize,
    /// Records resolved before this run
    pub already_resolved: usize,
    /// Records sent to the geocoder in this run
    pub processed: usize,
    /// Outcome tallies for this run
    pub stats: RunStats,
    /// Whether the run was stopped by cancellation
    pub interrupted: bool,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

impl GeocodeReport {
    /// Records still lacking coordinates after this run.
    pub fn unresolved(&self) -> usize {
        self.total - self.already_resolved - self.stats.ok
    }
}

/// Runs the geocoding job described by `config`.
///
/// Loads the table, geocodes every record without coordinates and saves the
/// table back in place. Cancelling `cancel` stops the run after the current
/// wait; the table is still saved and the report is still returned.
///
/// # Errors
///
/// This function will return an error if:
/// - No API key is configured
/// - The HTTP client cannot be built
/// - The table cannot be read, or the final save fails
///
/// # Example
///
/// ```no_run
/// use geobatch::{run_geocode, Config};
/// use std::path::PathBuf;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     file: PathBuf::from("data/map_prices.csv"),
///     api_key: "secret".to_string(),
///     ..Default::default()
/// };
/// let report = run_geocode(config, CancellationToken::new()).await?;
/// println!("{} resolved", report.stats.ok);
/// # Ok(())
/// # }
/// ```
pub async fn run_geocode(config: Config, cancel: CancellationToken) -> Result<GeocodeReport> {
    if config.api_key.trim().is_empty() {
        return Err(InitializationError::MissingApiKeyError { env: API_KEY_ENV }.into());
    }

    let geocoder = YandexGeocoder::from_settings(config.geocoder_settings())
        .context("Failed to initialize HTTP client")?;
    let store = CheckpointStore::new(&config.file, config.schema());

    info!("Loading table from {}", store.path().display());
    let mut table = store
        .load()
        .with_context(|| format!("Failed to load table {}", store.path().display()))?;

    let start_time = Instant::now();
    let batch = run_batch(
        &mut table,
        &geocoder,
        &store,
        &config.batch_settings(),
        &cancel,
    )
    .await
    .context("Failed to save table")?;

    Ok(GeocodeReport {
        path: config.file,
        total: batch.total,
        already_resolved: batch.already_resolved,
        processed: batch.processed,
        stats: batch.stats,
        interrupted: batch.interrupted,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}
