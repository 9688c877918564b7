//! Geocoding result types.

use std::fmt;

use crate::config::HIGH_CONFIDENCE_TAGS;
use crate::error_handling::OutcomeCategory;

/// A resolved position in (latitude, longitude) order.
///
/// Every component of this crate uses latitude first. Provider payloads use
/// the opposite order and must go through [`Coordinates::from_provider_pos`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parses a provider `"{lon} {lat}"` string.
    ///
    /// Anything other than exactly two finite numbers separated by
    /// whitespace is rejected with a short description.
    pub fn from_provider_pos(pos: &str) -> Result<Self, String> {
        let mut parts = pos.split_whitespace();
        let (Some(lon), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("expected \"lon lat\", got '{}'", pos));
        };
        let lon = parse_component(lon)?;
        let lat = parse_component(lat)?;
        Ok(Self { lat, lon })
    }
}

fn parse_component(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(format!("non-finite coordinate '{}'", raw)),
        Err(e) => Err(format!("could not convert '{}' to float: {}", raw, e)),
    }
}

/// Provider-reported match precision.
///
/// `exact`, `number` and `near` are house-level matches. Everything else is
/// still a usable position, just a coarser one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrecisionTier {
    Exact,
    Number,
    Near,
    Range,
    Street,
    Other,
    /// A tag this crate does not know, kept verbatim (may be empty).
    Unrecognized(String),
}

impl PrecisionTier {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "exact" => PrecisionTier::Exact,
            "number" => PrecisionTier::Number,
            "near" => PrecisionTier::Near,
            "range" => PrecisionTier::Range,
            "street" => PrecisionTier::Street,
            "other" => PrecisionTier::Other,
            unknown => PrecisionTier::Unrecognized(unknown.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PrecisionTier::Exact => "exact",
            PrecisionTier::Number => "number",
            PrecisionTier::Near => "near",
            PrecisionTier::Range => "range",
            PrecisionTier::Street => "street",
            PrecisionTier::Other => "other",
            PrecisionTier::Unrecognized(tag) => tag,
        }
    }

    pub fn is_high_confidence(&self) -> bool {
        HIGH_CONFIDENCE_TAGS.contains(&self.as_str())
    }
}

/// Terminal status of one geocoding call.
///
/// Renders to the status strings used in progress lines:
/// `ok`, `low_precision:<tag>`, `not_found`, `no_coords`, `timeout`,
/// `request_error:<detail>`, `parse_error:<detail>`, `max_retries`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeStatus {
    Ok,
    LowPrecision(String),
    NotFound,
    NoCoords,
    Timeout,
    RequestError(String),
    ParseError(String),
    MaxRetries,
}

impl GeocodeStatus {
    /// Whether an outcome with this status carries coordinates.
    pub fn has_coordinates(&self) -> bool {
        matches!(self, GeocodeStatus::Ok | GeocodeStatus::LowPrecision(_))
    }

    pub fn category(&self) -> OutcomeCategory {
        match self {
            GeocodeStatus::Ok => OutcomeCategory::Ok,
            GeocodeStatus::LowPrecision(_) => OutcomeCategory::LowPrecision,
            GeocodeStatus::NotFound => OutcomeCategory::NotFound,
            GeocodeStatus::NoCoords
            | GeocodeStatus::Timeout
            | GeocodeStatus::RequestError(_)
            | GeocodeStatus::ParseError(_)
            | GeocodeStatus::MaxRetries => OutcomeCategory::Error,
        }
    }
}

impl fmt::Display for GeocodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeStatus::Ok => write!(f, "ok"),
            GeocodeStatus::LowPrecision(tag) => write!(f, "low_precision:{}", tag),
            GeocodeStatus::NotFound => write!(f, "not_found"),
            GeocodeStatus::NoCoords => write!(f, "no_coords"),
            GeocodeStatus::Timeout => write!(f, "timeout"),
            GeocodeStatus::RequestError(detail) => write!(f, "request_error:{}", detail),
            GeocodeStatus::ParseError(detail) => write!(f, "parse_error:{}", detail),
            GeocodeStatus::MaxRetries => write!(f, "max_retries"),
        }
    }
}

/// Result of resolving one address.
///
/// Coordinates are present exactly when the status is `ok` or
/// `low_precision:*`; the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeOutcome {
    coordinates: Option<Coordinates>,
    status: GeocodeStatus,
}

impl GeocodeOutcome {
    /// A match. Low-precision matches keep their coordinates.
    pub fn located(coordinates: Coordinates, precision: &PrecisionTier) -> Self {
        let status = if precision.is_high_confidence() {
            GeocodeStatus::Ok
        } else {
            GeocodeStatus::LowPrecision(precision.as_str().to_string())
        };
        Self {
            coordinates: Some(coordinates),
            status,
        }
    }

    /// No coordinates. `status` must not be `ok` or `low_precision:*`.
    pub fn unresolved(status: GeocodeStatus) -> Self {
        debug_assert!(
            !status.has_coordinates(),
            "unresolved outcome built with status {}",
            status
        );
        Self {
            coordinates: None,
            status,
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn status(&self) -> &GeocodeStatus {
        &self.status
    }

    pub fn into_parts(self) -> (Option<Coordinates>, GeocodeStatus) {
        (self.coordinates, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_pos_is_swapped() {
        let coords = Coordinates::from_provider_pos("37.62 55.75").unwrap();
        assert_eq!(coords.lat, 55.75);
        assert_eq!(coords.lon, 37.62);
    }

    #[test]
    fn test_provider_pos_tolerates_extra_whitespace() {
        let coords = Coordinates::from_provider_pos("  37.0\t55.0 ").unwrap();
        assert_eq!(coords, Coordinates::new(55.0, 37.0));
    }

    #[test]
    fn test_provider_pos_rejects_wrong_arity() {
        assert!(Coordinates::from_provider_pos("37.62").is_err());
        assert!(Coordinates::from_provider_pos("37.62 55.75 10").is_err());
        assert!(Coordinates::from_provider_pos("   ").is_err());
    }

    #[test]
    fn test_provider_pos_rejects_garbage() {
        let err = Coordinates::from_provider_pos("abc 55.75").unwrap_err();
        assert!(err.contains("abc"));
        assert!(Coordinates::from_provider_pos("NaN 55.75").is_err());
        assert!(Coordinates::from_provider_pos("37.0 inf").is_err());
    }

    #[test]
    fn test_high_confidence_tiers() {
        for tag in ["exact", "number", "near"] {
            assert!(PrecisionTier::from_tag(tag).is_high_confidence(), "{tag}");
        }
        for tag in ["range", "street", "other", "", "district"] {
            assert!(!PrecisionTier::from_tag(tag).is_high_confidence(), "{tag}");
        }
    }

    #[test]
    fn test_unrecognized_tag_round_trips() {
        let tier = PrecisionTier::from_tag("district");
        assert_eq!(tier, PrecisionTier::Unrecognized("district".to_string()));
        assert_eq!(tier.as_str(), "district");
    }

    #[test]
    fn test_located_classification() {
        let coords = Coordinates::new(55.0, 37.0);
        let exact = GeocodeOutcome::located(coords, &PrecisionTier::Exact);
        assert_eq!(exact.status(), &GeocodeStatus::Ok);
        assert_eq!(exact.coordinates(), Some(coords));

        let street = GeocodeOutcome::located(coords, &PrecisionTier::Street);
        assert_eq!(street.status().to_string(), "low_precision:street");
        assert_eq!(street.coordinates(), Some(coords));
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(GeocodeStatus::Ok.to_string(), "ok");
        assert_eq!(GeocodeStatus::NotFound.to_string(), "not_found");
        assert_eq!(GeocodeStatus::NoCoords.to_string(), "no_coords");
        assert_eq!(GeocodeStatus::Timeout.to_string(), "timeout");
        assert_eq!(GeocodeStatus::MaxRetries.to_string(), "max_retries");
        assert_eq!(
            GeocodeStatus::RequestError("boom".to_string()).to_string(),
            "request_error:boom"
        );
        assert_eq!(
            GeocodeStatus::ParseError("eof".to_string()).to_string(),
            "parse_error:eof"
        );
    }

    #[test]
    fn test_unresolved_has_no_coordinates() {
        let outcome = GeocodeOutcome::unresolved(GeocodeStatus::NotFound);
        assert!(outcome.coordinates().is_none());
        assert!(!outcome.status().has_coordinates());
    }
}
