//! Index keys derived from the on-disk layout.
//!
//! Keys are plain newtypes so lookups cannot mix a raw string with a
//! normalized one. `LocationKey` in particular can only be built through the
//! canonical normalizer, which keeps the build-time and query-time sides of
//! the location index byte-identical.

use crate::model::City;
use crate::normalize;
use std::fmt;

/// Numeric version of a published batch, `v<N>` on disk.
///
/// Versions order numerically, not lexicographically, so `v2` sorts before
/// `v10`. A version is immutable once published; new data always gets a new
/// number.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Version(pub u64);

impl Version {
    /// Parse the `v<digits>` form used for version directory names and for
    /// request tokens. Anything else (no prefix, empty digits, stray
    /// characters, digit strings too large to represent) is `None`.
    pub fn from_prefixed(value: &str) -> Option<Self> {
        Self::from_digits(value.strip_prefix('v')?)
    }

    /// Parse a bare digit string, e.g. the publish CLI argument.
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u64>().ok().map(Version)
    }

    /// Directory name under a version store root.
    pub fn dir_name(self) -> String {
        format!("v{}", self.0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Primary index key: one loaded file, `"<version>/<filename>"`.
///
/// Ordering is version-major, so a `BTreeMap` keyed by `FileKey` iterates in
/// ascending version order and supports per-version range scans.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FileKey {
    pub version: Version,
    pub filename: String,
}

impl FileKey {
    pub fn new(version: Version, filename: impl Into<String>) -> Self {
        Self {
            version,
            filename: filename.into(),
        }
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.version, self.filename)
    }
}

/// Secondary index key over island group, region code, province, and city.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LocationKey(String);

impl LocationKey {
    /// Build the key from free-text fields via the canonical normalizer.
    pub fn from_parts(island_group: &str, region_code: &str, province: &str, city: &str) -> Self {
        Self(normalize::location_key(
            island_group,
            region_code,
            province,
            city,
        ))
    }

    /// Key for a loaded record.
    pub fn from_city(record: &City) -> Self {
        Self::from_parts(
            record.island_group.as_str(),
            &record.region_code,
            &record.province,
            &record.city,
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_versions_parse_strictly() {
        assert_eq!(Version::from_prefixed("v0"), Some(Version(0)));
        assert_eq!(Version::from_prefixed("v12"), Some(Version(12)));
        assert_eq!(Version::from_prefixed("1"), None);
        assert_eq!(Version::from_prefixed("v"), None);
        assert_eq!(Version::from_prefixed("v1x"), None);
        assert_eq!(Version::from_prefixed("V1"), None);
        assert_eq!(Version::from_prefixed("v-1"), None);
        assert_eq!(Version::from_prefixed("v99999999999999999999999"), None);
    }

    #[test]
    fn versions_order_numerically() {
        let mut versions = vec![Version(10), Version(2), Version(1)];
        versions.sort();
        assert_eq!(versions, vec![Version(1), Version(2), Version(10)]);
        assert_eq!(Version(10).dir_name(), "v10");
        assert_eq!(Version(10).to_string(), "10");
    }

    #[test]
    fn file_keys_order_version_major() {
        let mut keys = vec![
            FileKey::new(Version(10), "a.json"),
            FileKey::new(Version(2), "z.json"),
            FileKey::new(Version(2), "a.json"),
        ];
        keys.sort();
        assert_eq!(keys[0].to_string(), "2/a.json");
        assert_eq!(keys[1].to_string(), "2/z.json");
        assert_eq!(keys[2].to_string(), "10/a.json");
    }

    #[test]
    fn location_keys_match_across_spellings() {
        let built = LocationKey::from_parts("Luzon", "06", "Iloilo", "Iloilo City");
        let queried = LocationKey::from_parts("luzon", "06", "ILOILO", "iloilo  city");
        assert_eq!(built, queried);
        assert_eq!(built.as_str(), "luzon|06|iloilo|iloilocity");
    }
}
