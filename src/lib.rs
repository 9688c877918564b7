//! geobatch library: resumable batch geocoding of address tables
//!
//! Resolves coordinates for every row of a CSV address table through the
//! Yandex HTTP Geocoder, one request at a time. Progress is written back to
//! the same file periodically and on every exit path, so an interrupted run
//! resumes where it stopped without re-querying resolved rows.
//!
//! # Example
//!
//! ```no_run
//! use geobatch::{run_geocode, Config};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("data/map_prices.csv"),
//!     api_key: std::env::var("GEOBATCH_API_KEY")?,
//!     ..Default::default()
//! };
//!
//! let report = run_geocode(config, CancellationToken::new()).await?;
//! println!("ok={} not_found={} errors={}",
//!          report.stats.ok, report.stats.not_found, report.stats.error);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

mod app;
pub mod batch;
pub mod checkpoint;
pub mod config;
mod error_handling;
pub mod geocode;
pub mod initialization;
mod run;
mod utils;

// Re-export public API
pub use app::spawn_signal_listener;
pub use batch::{run_batch, BatchReport, BatchSettings};
pub use checkpoint::{
    AddressRecord, AddressTable, CheckpointGuard, CheckpointStore, StatsReporter, TableSchema,
};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{CheckpointError, InitializationError, OutcomeCategory, RunStats};
pub use geocode::{
    Coordinates, GeocodeOutcome, GeocodeStatus, Geocoder, GeocoderSettings, PrecisionTier,
    YandexGeocoder,
};
pub use run::{run_geocode, GeocodeReport};
