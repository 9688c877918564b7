//! Attempt errors and the retry strategy.

use std::time::Duration;

use thiserror::Error;
use tokio_retry::strategy::FixedInterval;

use crate::utils::sanitize_and_truncate_error_message;

use super::GeocodeStatus;

/// Failure of a single request attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttemptError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection, protocol or HTTP status failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// The provider answered with a body of the wrong shape.
    #[error("malformed response: {0}")]
    Parse(String),
}

impl AttemptError {
    /// Transient failures are retried; malformed responses are not.
    pub(crate) fn is_transient(&self) -> bool {
        match self {
            AttemptError::Timeout | AttemptError::Transport(_) => true,
            AttemptError::Parse(_) => false,
        }
    }

    /// Status recorded when this error is the last one of a call.
    pub(crate) fn into_status(self) -> GeocodeStatus {
        match self {
            AttemptError::Timeout => GeocodeStatus::Timeout,
            AttemptError::Transport(detail) => GeocodeStatus::RequestError(detail),
            AttemptError::Parse(detail) => GeocodeStatus::ParseError(detail),
        }
    }

    pub(crate) fn parse(message: impl AsRef<str>) -> Self {
        AttemptError::Parse(sanitize_and_truncate_error_message(message.as_ref()))
    }
}

impl From<reqwest::Error> for AttemptError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return AttemptError::Timeout;
        }
        // The URL carries the API key; keep it out of statuses and logs
        let message = e.without_url().to_string();
        AttemptError::Transport(sanitize_and_truncate_error_message(&message))
    }
}

/// Delays between attempts: a fixed pause, `max_attempts - 1` times.
///
/// `tokio_retry` makes one initial attempt and then one more per item.
pub(crate) fn retry_strategy(max_attempts: usize, delay: Duration) -> impl Iterator<Item = Duration> {
    FixedInterval::new(delay).take(max_attempts.saturating_sub(1))
}
