//! Typed decode of the provider response.
//!
//! Only the fields the client reads are modelled. Missing envelope levels
//! decode as empty, which is how the provider reports "no match"; values of
//! the wrong JSON type are decode errors.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    response: ResponseBody,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseBody {
    #[serde(rename = "GeoObjectCollection", default)]
    collection: GeoObjectCollection,
}

#[derive(Debug, Default, Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    feature_members: Vec<FeatureMember>,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject", default)]
    geo_object: GeoObject,
}

#[derive(Debug, Default, Deserialize)]
struct GeoObject {
    #[serde(rename = "Point", default)]
    point: Point,
    #[serde(rename = "metaDataProperty", default)]
    meta: MetaDataProperty,
}

#[derive(Debug, Default, Deserialize)]
struct Point {
    #[serde(default)]
    pos: String,
}

#[derive(Debug, Default, Deserialize)]
struct MetaDataProperty {
    #[serde(rename = "GeocoderMetaData", default)]
    geocoder: GeocoderMetaData,
}

#[derive(Debug, Default, Deserialize)]
struct GeocoderMetaData {
    #[serde(default)]
    precision: String,
}

/// First candidate of a geocoding response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    /// Raw `"{lon} {lat}"` string, empty when the provider sent none
    pub pos: String,
    /// Raw precision tag, empty when the provider sent none
    pub precision: String,
}

/// Decodes a response body into its first candidate, if any.
pub(crate) fn decode_first_candidate(body: &str) -> Result<Option<Candidate>, serde_json::Error> {
    let envelope: Envelope = serde_json::from_str(body)?;
    Ok(envelope
        .response
        .collection
        .feature_members
        .into_iter()
        .next()
        .map(|member| Candidate {
            pos: member.geo_object.point.pos,
            precision: member.geo_object.meta.geocoder.precision,
        }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUND: &str = r#"{
        "response": {
            "GeoObjectCollection": {
                "metaDataProperty": {"GeocoderResponseMetaData": {"found": "1"}},
                "featureMember": [{
                    "GeoObject": {
                        "metaDataProperty": {
                            "GeocoderMetaData": {"precision": "exact", "kind": "house"}
                        },
                        "name": "ул. Ленина, 1",
                        "Point": {"pos": "37.62 55.75"}
                    }
                }]
            }
        }
    }"#;

    #[test]
    fn test_decode_first_candidate() {
        let candidate = decode_first_candidate(FOUND).unwrap().unwrap();
        assert_eq!(candidate.pos, "37.62 55.75");
        assert_eq!(candidate.precision, "exact");
    }

    #[test]
    fn test_empty_feature_member_is_no_candidate() {
        let body = r#"{"response":{"GeoObjectCollection":{"featureMember":[]}}}"#;
        assert_eq!(decode_first_candidate(body).unwrap(), None);
    }

    #[test]
    fn test_missing_envelope_is_no_candidate() {
        assert_eq!(decode_first_candidate("{}").unwrap(), None);
        assert_eq!(decode_first_candidate(r#"{"response":{}}"#).unwrap(), None);
    }

    #[test]
    fn test_candidate_without_point() {
        let body = r#"{"response":{"GeoObjectCollection":{"featureMember":[
            {"GeoObject":{"metaDataProperty":{"GeocoderMetaData":{"precision":"street"}}}}
        ]}}}"#;
        let candidate = decode_first_candidate(body).unwrap().unwrap();
        assert!(candidate.pos.is_empty());
        assert_eq!(candidate.precision, "street");
    }

    #[test]
    fn test_only_first_candidate_is_used() {
        let body = r#"{"response":{"GeoObjectCollection":{"featureMember":[
            {"GeoObject":{"Point":{"pos":"1 2"}}},
            {"GeoObject":{"Point":{"pos":"3 4"}}}
        ]}}}"#;
        let candidate = decode_first_candidate(body).unwrap().unwrap();
        assert_eq!(candidate.pos, "1 2");
        assert!(candidate.precision.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let body = r#"{"response":{"GeoObjectCollection":{"featureMember":"none"}}}"#;
        assert!(decode_first_candidate(body).is_err());
        assert!(decode_first_candidate("<html>Forbidden</html>").is_err());
    }
}
