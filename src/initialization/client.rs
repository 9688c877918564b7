//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{DEFAULT_USER_AGENT, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;
use crate::geocode::GeocoderSettings;

/// Initializes the HTTP client used for provider requests.
///
/// Creates a `reqwest::Client` configured with:
/// - The per-request timeout from the settings
/// - A TCP connect timeout so unreachable hosts fail fast
/// - An identifying User-Agent
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(settings: &GeocoderSettings) -> Result<reqwest::Client, InitializationError> {
    let connect_timeout = Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS).min(settings.timeout);
    let client = ClientBuilder::new()
        .timeout(settings.timeout)
        .connect_timeout(connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()?;
    Ok(client)
}
