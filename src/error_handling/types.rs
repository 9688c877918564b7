//! Error type definitions.
//!
//! Fatal conditions are `thiserror` enums. Per-record failures are not errors
//! at all: they are `GeocodeStatus` values, grouped here by `OutcomeCategory`.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// No API key was supplied on the command line or in the environment.
    #[error("Geocoder API key is missing (set --api-key or {env})")]
    MissingApiKeyError {
        /// Environment variable that was consulted
        env: &'static str,
    },
}

/// Error types for reading and writing the durable table.
///
/// Any of these halts the run: without a readable table there is nothing to
/// do, and without a writable one progress cannot be kept.
#[derive(Error, Debug)]
pub enum CheckpointError {
    /// Filesystem error while opening, writing or syncing the table.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Table path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader or writer rejected the data.
    #[error("CSV error on {path}: {source}")]
    Csv {
        /// Table path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: csv::Error,
    },

    /// A column the schema requires is absent from the header.
    #[error("Required column '{column}' not found in table header")]
    MissingColumn {
        /// Missing header
        column: String,
    },

    /// A stored coordinate cell is not a number.
    #[error("Row {row}: column '{column}' holds '{value}', expected a number")]
    InvalidCoordinate {
        /// 1-based data row (header excluded)
        row: usize,
        /// Coordinate column header
        column: String,
        /// Offending cell
        value: String,
    },

    /// The temporary copy could not replace the previous table.
    #[error("Failed to replace {path}: {source}")]
    Persist {
        /// Table path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: tempfile::PersistError,
    },
}

/// Statistics bucket a geocoding status falls into.
///
/// Low-precision results keep their coordinates and are counted both as
/// `Ok` and as `LowPrecision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum OutcomeCategory {
    /// Coordinates stored
    Ok,
    /// Coordinates stored, provider match was approximate
    LowPrecision,
    /// Provider answered with no usable candidate
    NotFound,
    /// Transport, parse or exhaustion failure
    Error,
}

impl OutcomeCategory {
    /// Label used in run summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeCategory::Ok => "ok",
            OutcomeCategory::LowPrecision => "low_precision",
            OutcomeCategory::NotFound => "not_found",
            OutcomeCategory::Error => "error",
        }
    }
}
