//! Configuration constants.
//!
//! Fixed contract values for the provider request, the batch pacing and the
//! table layout. The tunable ones are used as CLI defaults.

use std::time::Duration;

// Provider request
/// Default geocoder endpoint (Yandex HTTP Geocoder).
pub const DEFAULT_GEOCODER_URL: &str = "https://geocode-maps.yandex.ru/1.x/";
/// Country prefix prepended to every query.
pub const COUNTRY_PREFIX: &str = "Russia";
/// Response format requested from the provider.
pub const RESPONSE_FORMAT: &str = "json";
/// Number of candidates requested per query.
pub const RESULTS_PER_QUERY: u32 = 1;
/// Precision tags the provider uses for house-level matches.
pub const HIGH_CONFIDENCE_TAGS: &[&str] = &["exact", "number", "near"];

// Network operation timeouts
/// Per-request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// User-Agent sent with provider requests.
pub const DEFAULT_USER_AGENT: &str = concat!("geobatch/", env!("CARGO_PKG_VERSION"));

// Retry strategy
/// Maximum number of attempts per address (initial attempt included).
/// 3 = initial attempt + 2 retries
pub const RETRY_MAX_ATTEMPTS: usize = 3;
/// Pause between attempts in milliseconds
pub const RETRY_DELAY_MS: u64 = 1000;

// Batch pacing
/// Delay after every processed record in milliseconds.
/// The provider is rate-sensitive; this applies on error paths too.
pub const REQUEST_DELAY_MS: u64 = 100;
/// Persist the table every N processed records
pub const CHECKPOINT_EVERY: usize = 50;
/// Log a progress line every N processed records
pub const PROGRESS_EVERY: usize = 10;

// Message limits
/// Maximum characters of an error message kept in a status string
pub const MAX_ERROR_DETAIL_CHARS: usize = 50;
/// Maximum characters of an address shown in progress lines
pub const MAX_PROGRESS_ADDRESS_CHARS: usize = 40;

// Table layout
pub const DEFAULT_ADDRESS_COLUMN: &str = "Address";
pub const DEFAULT_REGION_COLUMN: &str = "Region";
pub const DEFAULT_LAT_COLUMN: &str = "lat";
pub const DEFAULT_LON_COLUMN: &str = "lon";
/// Business columns that must be present even though they are never read.
pub const DEFAULT_REQUIRED_COLUMNS: &[&str] = &["Price", "ContactsPerMonth", "Hours"];

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "GEOBATCH_API_KEY";

/// Converts a millisecond setting to a `Duration`.
pub(crate) fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
