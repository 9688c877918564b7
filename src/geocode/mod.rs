//! Geocode client.
//!
//! Resolves one address to a coordinate pair through the provider, classifies
//! the match precision and retries transient network failures.
//!
//! The batch orchestrator depends only on the [`Geocoder`] trait, so it can
//! be driven by a stub in tests.

mod client;
mod outcome;
mod response;
mod retry;

use std::time::Duration;

use crate::config::{
    millis, DEFAULT_GEOCODER_URL, REQUEST_TIMEOUT_SECS, RETRY_DELAY_MS, RETRY_MAX_ATTEMPTS,
};

// Re-export public API
pub use client::{build_query, YandexGeocoder};
pub use outcome::{Coordinates, GeocodeOutcome, GeocodeStatus, PrecisionTier};

/// Resolves a street address within a region.
///
/// Implementations never fail: every problem is reported through the
/// outcome's status.
#[allow(async_fn_in_trait)]
pub trait Geocoder {
    async fn resolve(&self, address: &str, region: &str) -> GeocodeOutcome;
}

/// Provider connection and retry settings.
#[derive(Debug, Clone)]
pub struct GeocoderSettings {
    /// Endpoint URL
    pub endpoint: String,
    /// Provider API key
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Attempts per address, initial attempt included
    pub max_attempts: usize,
    /// Pause between attempts
    pub retry_delay: Duration,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOCODER_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            max_attempts: RETRY_MAX_ATTEMPTS,
            retry_delay: millis(RETRY_DELAY_MS),
        }
    }
}
