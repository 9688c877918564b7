//! HTTP geocoder client.

use log::{debug, warn};
use tokio_retry::RetryIf;

use crate::config::{COUNTRY_PREFIX, RESPONSE_FORMAT, RESULTS_PER_QUERY};
use crate::error_handling::InitializationError;
use crate::initialization::init_client;

use super::response::{decode_first_candidate, Candidate};
use super::retry::{retry_strategy, AttemptError};
use super::{
    Coordinates, GeocodeOutcome, GeocodeStatus, Geocoder, GeocoderSettings, PrecisionTier,
};

/// Builds the free-text query sent to the provider.
pub fn build_query(region: &str, address: &str) -> String {
    format!("{}, {}, {}", COUNTRY_PREFIX, region, address)
}

/// Geocoder backed by the Yandex HTTP Geocoder API.
///
/// One request per address, one candidate per request. Transient transport
/// failures are retried with a fixed pause; malformed responses are not.
#[derive(Debug, Clone)]
pub struct YandexGeocoder {
    client: reqwest::Client,
    settings: GeocoderSettings,
}

impl YandexGeocoder {
    /// Wraps an existing client.
    pub fn new(client: reqwest::Client, settings: GeocoderSettings) -> Self {
        Self { client, settings }
    }

    /// Builds a dedicated client from the settings.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_settings(settings: GeocoderSettings) -> Result<Self, InitializationError> {
        let client = init_client(&settings)?;
        Ok(Self::new(client, settings))
    }

    async fn attempt(&self, geocode: &str, attempt: usize) -> Result<Option<Candidate>, AttemptError> {
        debug!("Geocoding attempt {} for '{}'", attempt, geocode);

        let results = RESULTS_PER_QUERY.to_string();
        let response = self
            .client
            .get(&self.settings.endpoint)
            .query(&[
                ("apikey", self.settings.api_key.as_str()),
                ("geocode", geocode),
                ("format", RESPONSE_FORMAT),
                ("results", results.as_str()),
            ])
            .timeout(self.settings.timeout)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        decode_body(&body)
    }
}

impl Geocoder for YandexGeocoder {
    async fn resolve(&self, address: &str, region: &str) -> GeocodeOutcome {
        if self.settings.max_attempts == 0 {
            warn!("No attempts allowed, skipping '{}'", address);
            return GeocodeOutcome::unresolved(GeocodeStatus::MaxRetries);
        }

        let geocode = build_query(region, address);
        let this = self;
        let query = geocode.as_str();
        let mut attempt = 0usize;

        let result = RetryIf::start(
            retry_strategy(self.settings.max_attempts, self.settings.retry_delay),
            move || {
                attempt += 1;
                this.attempt(query, attempt)
            },
            AttemptError::is_transient,
        )
        .await;

        match result {
            Ok(None) => GeocodeOutcome::unresolved(GeocodeStatus::NotFound),
            Ok(Some(candidate)) => candidate_outcome(candidate),
            Err(e) => {
                if e.is_transient() {
                    warn!("Giving up on '{}' after retries: {}", geocode, e);
                } else {
                    warn!("Unusable response for '{}': {}", geocode, e);
                }
                GeocodeOutcome::unresolved(e.into_status())
            }
        }
    }
}

fn decode_body(body: &str) -> Result<Option<Candidate>, AttemptError> {
    decode_first_candidate(body).map_err(|e| AttemptError::parse(e.to_string()))
}

fn candidate_outcome(candidate: Candidate) -> GeocodeOutcome {
    if candidate.pos.is_empty() {
        return GeocodeOutcome::unresolved(GeocodeStatus::NoCoords);
    }
    match Coordinates::from_provider_pos(&candidate.pos) {
        Ok(coordinates) => {
            GeocodeOutcome::located(coordinates, &PrecisionTier::from_tag(&candidate.precision))
        }
        Err(detail) => GeocodeOutcome::unresolved(AttemptError::parse(detail).into_status()),
    }
}
