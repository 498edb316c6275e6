//! Frozen view of everything one scan loaded.
//!
//! A snapshot owns the two lookup indexes and never changes after
//! construction: every method takes `&self`, so a snapshot can be shared
//! across concurrent readers with no locking. Replacing data means building a
//! whole new snapshot and swapping it in via `RouteRegistry`.

use crate::model::City;
use crate::registry::keys::{FileKey, LocationKey, Version};
use std::collections::BTreeMap;

/// Aggregate counters reported after a scan. Informational only; nothing
/// branches on these.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadStats {
    pub versions_scanned: usize,
    pub files_loaded: usize,
    pub files_failed: usize,
    pub versions_without_schema: usize,
}

/// Both lookup indexes plus the stats of the scan that built them.
#[derive(Debug, Default)]
pub struct RegistrySnapshot {
    file_index: BTreeMap<FileKey, City>,
    location_index: BTreeMap<LocationKey, FileKey>,
    stats: LoadStats,
}

impl RegistrySnapshot {
    /// The valid zero-data state used when the store root is absent.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        file_index: BTreeMap<FileKey, City>,
        location_index: BTreeMap<LocationKey, FileKey>,
        stats: LoadStats,
    ) -> Self {
        Self {
            file_index,
            location_index,
            stats,
        }
    }

    /// Exact file-key lookup.
    pub fn get_by_version_and_file(&self, version: Version, filename: &str) -> Option<&City> {
        self.file_index.get(&FileKey::new(version, filename))
    }

    /// Location-index lookup over free-text fields.
    ///
    /// Arguments are normalized with the canonical location-key rules, then
    /// resolved through the location index and the file index in turn. A stale
    /// location entry whose file key no longer resolves is a miss, not an
    /// error.
    pub fn find_by_location(
        &self,
        island_group: &str,
        region_code: &str,
        province: &str,
        city: &str,
    ) -> Option<&City> {
        let key = LocationKey::from_parts(island_group, region_code, province, city);
        let file_key = self.location_index.get(&key)?;
        self.file_index.get(file_key)
    }

    /// Distinct loaded versions in ascending numeric order.
    pub fn versions(&self) -> Vec<Version> {
        let mut versions: Vec<Version> = self.file_index.keys().map(|key| key.version).collect();
        versions.dedup();
        versions
    }

    /// Filenames loaded under one version, in key order.
    pub fn files_in_version(&self, version: Version) -> Vec<&str> {
        self.file_index
            .range(FileKey::new(version, String::new())..)
            .take_while(|(key, _)| key.version == version)
            .map(|(key, _)| key.filename.as_str())
            .collect()
    }

    /// Number of loaded records across all versions.
    pub fn len(&self) -> usize {
        self.file_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_index.is_empty()
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}
