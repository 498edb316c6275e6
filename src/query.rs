//! Point lookup consumed by the routing layer.
//!
//! Resolves a two-part key, a `v<digits>` token plus a free-text city name,
//! against one snapshot. This path scans the version's files and compares
//! city names only (via [`city_token`]); it does not consult the location
//! index, whose four-field key answers a different question. Failures are
//! typed so a transport can map them to bad-request versus not-found.

use crate::model::City;
use crate::normalize::city_token;
use crate::registry::keys::Version;
use crate::registry::snapshot::RegistrySnapshot;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum QueryError {
    /// The version token is not `v<digits>`; rejected before any lookup runs.
    #[error("version must be in the form \"v1\", \"v12\", etc.; got {0:?}")]
    MalformedVersion(String),
    /// The version has no loaded files at all.
    #[error("no routes published in version v{0}")]
    NoRoutesPublished(Version),
    /// The version exists but no record's city matches the query.
    #[error("no route data found for city {city:?} in version v{version}")]
    CityNotFound { version: Version, city: String },
}

impl QueryError {
    /// True for malformed requests, false for plain misses.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, QueryError::MalformedVersion(_))
    }
}

/// Find the full City record whose city name matches `city` within one
/// published version.
///
/// `version_param` arrives in its external `v<digits>` form. The city match
/// is a linear scan over the version's files with both sides reduced through
/// [`city_token`], so `"Iloilo City"`, `"iloilo-city"`, and `"iloilocity"`
/// all hit the same record.
pub fn find_city_routes<'a>(
    snapshot: &'a RegistrySnapshot,
    version_param: &str,
    city: &str,
) -> Result<&'a City, QueryError> {
    let Some(version) = Version::from_prefixed(version_param) else {
        return Err(QueryError::MalformedVersion(version_param.to_string()));
    };

    let files = snapshot.files_in_version(version);
    if files.is_empty() {
        return Err(QueryError::NoRoutesPublished(version));
    }

    let wanted = city_token(city);
    for filename in files {
        let Some(record) = snapshot.get_by_version_and_file(version, filename) else {
            continue;
        };
        if city_token(&record.city) == wanted {
            return Ok(record);
        }
    }

    Err(QueryError::CityNotFound {
        version,
        city: city.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_tokens_are_rejected_before_lookup() {
        let snapshot = RegistrySnapshot::empty();
        for token in ["1", "v", "v1x", "V1", ""] {
            let err = find_city_routes(&snapshot, token, "iloilo").unwrap_err();
            assert_eq!(err, QueryError::MalformedVersion(token.to_string()));
            assert!(err.is_bad_request());
        }
    }

    #[test]
    fn unknown_version_is_not_found_not_bad_request() {
        let snapshot = RegistrySnapshot::empty();
        let err = find_city_routes(&snapshot, "v99", "iloilo").unwrap_err();
        assert_eq!(err, QueryError::NoRoutesPublished(Version(99)));
        assert!(!err.is_bad_request());
        assert_eq!(
            err.to_string(),
            "no routes published in version v99"
        );
    }
}
