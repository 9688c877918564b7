//! Configuration types and CLI options.
//!
//! `Config` doubles as the library configuration and the clap command
//! definition, so the binary is a thin wrapper around `Config::parse()`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::batch::BatchSettings;
use crate::checkpoint::TableSchema;
use crate::config::constants::*;
use crate::geocode::GeocoderSettings;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Geocoding job configuration.
///
/// # Examples
///
/// ```no_run
/// use geobatch::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("data/map_prices.csv"),
///     api_key: "secret".to_string(),
///     ..Default::default()
/// };
/// ```
///
/// ```bash
/// # Basic usage (key from GEOBATCH_API_KEY or .env)
/// geobatch data/map_prices.csv
///
/// # Localized headers
/// geobatch data/map_prices.csv --address-column Адрес --region-column Регион \
///     --require-column Цена --require-column "Часы работы"
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "geobatch",
    about = "Resolves coordinates for an address table, resuming where the last run stopped."
)]
pub struct Config {
    /// CSV table to geocode in place
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Geocoder API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// Geocoder endpoint
    #[arg(long, default_value = DEFAULT_GEOCODER_URL)]
    pub geocoder_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Attempts per address on transient network failures
    #[arg(long, default_value_t = RETRY_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Pause between attempts in milliseconds
    #[arg(long, default_value_t = RETRY_DELAY_MS)]
    pub retry_delay_ms: u64,

    /// Delay after every request in milliseconds
    #[arg(long, default_value_t = REQUEST_DELAY_MS)]
    pub request_delay_ms: u64,

    /// Save the table every N processed records
    #[arg(long, default_value_t = CHECKPOINT_EVERY)]
    pub checkpoint_every: usize,

    /// Log progress every N processed records
    #[arg(long, default_value_t = PROGRESS_EVERY)]
    pub progress_every: usize,

    /// Header of the address column
    #[arg(long, default_value = DEFAULT_ADDRESS_COLUMN)]
    pub address_column: String,

    /// Header of the region column
    #[arg(long, default_value = DEFAULT_REGION_COLUMN)]
    pub region_column: String,

    /// Header of the latitude column (created if missing)
    #[arg(long, default_value = DEFAULT_LAT_COLUMN)]
    pub lat_column: String,

    /// Header of the longitude column (created if missing)
    #[arg(long, default_value = DEFAULT_LON_COLUMN)]
    pub lon_column: String,

    /// Column that must exist in the table (repeatable)
    #[arg(
        long = "require-column",
        value_name = "COLUMN",
        default_values_t = default_required_columns()
    )]
    pub required_columns: Vec<String>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

fn default_required_columns() -> Vec<String> {
    DEFAULT_REQUIRED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("map_prices.csv"),
            api_key: String::new(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            max_attempts: RETRY_MAX_ATTEMPTS,
            retry_delay_ms: RETRY_DELAY_MS,
            request_delay_ms: REQUEST_DELAY_MS,
            checkpoint_every: CHECKPOINT_EVERY,
            progress_every: PROGRESS_EVERY,
            address_column: DEFAULT_ADDRESS_COLUMN.to_string(),
            region_column: DEFAULT_REGION_COLUMN.to_string(),
            lat_column: DEFAULT_LAT_COLUMN.to_string(),
            lon_column: DEFAULT_LON_COLUMN.to_string(),
            required_columns: default_required_columns(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Settings for the HTTP geocoder.
    pub fn geocoder_settings(&self) -> GeocoderSettings {
        GeocoderSettings {
            endpoint: self.geocoder_url.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
            max_attempts: self.max_attempts,
            retry_delay: millis(self.retry_delay_ms),
        }
    }

    /// Settings for the batch loop.
    pub fn batch_settings(&self) -> BatchSettings {
        BatchSettings {
            request_delay: millis(self.request_delay_ms),
            checkpoint_every: self.checkpoint_every,
            progress_every: self.progress_every,
        }
    }

    /// Column layout expected in the table.
    pub fn schema(&self) -> TableSchema {
        TableSchema {
            address: self.address_column.clone(),
            region: self.region_column.clone(),
            lat: self.lat_column.clone(),
            lon: self.lon_column.clone(),
            required: self.required_columns.clone(),
        }
    }
}
