//! One-pass scan of a version store root into a fresh snapshot.
//!
//! The scan is forgiving: a missing root, a stray directory, or a corrupt
//! data file each cost at most that entry. Failures are logged and
//! counted, and the rest of the store still loads; the serving path must
//! come up with whatever valid data exists, including none at all.

use crate::model::{City, read_city};
use crate::registry::keys::{FileKey, LocationKey, Version};
use crate::registry::snapshot::{LoadStats, RegistrySnapshot};
use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

// A single runaway file must not stall the load; anything this large is not
// a plausible City record.
const MAX_DATA_FILE_BYTES: u64 = 16 * 1024 * 1024;

/// Scan `root` and build both indexes.
///
/// Never fails: an absent or unreadable root yields the empty snapshot. Scan
/// order is ascending version then filename, so when two files normalize to
/// the same location key the highest version wins deterministically.
pub fn scan_version_store(root: &Path) -> RegistrySnapshot {
    if !root.exists() {
        warn!(root = %root.display(), "version store root not found; serving zero records");
        return RegistrySnapshot::empty();
    }

    let version_dirs = match list_version_dirs(root) {
        Ok(dirs) => dirs,
        Err(err) => {
            error!(root = %root.display(), "failed to scan version store: {err:#}");
            return RegistrySnapshot::empty();
        }
    };
    if version_dirs.is_empty() {
        warn!(root = %root.display(), "no published versions found");
        return RegistrySnapshot::empty();
    }

    let mut file_index: BTreeMap<FileKey, City> = BTreeMap::new();
    let mut location_index: BTreeMap<LocationKey, FileKey> = BTreeMap::new();
    let mut stats = LoadStats::default();

    for (version, dir) in version_dirs {
        stats.versions_scanned += 1;

        let schema_name = format!("{}.schema.json", version.dir_name());
        if !dir.join(&schema_name).is_file() {
            stats.versions_without_schema += 1;
            warn!(version = %version.dir_name(), "published version has no {schema_name}");
        }

        let files = match list_data_files(&dir) {
            Ok(files) => files,
            Err(err) => {
                error!(version = %version.dir_name(), "failed to list version directory: {err:#}");
                continue;
            }
        };

        for (filename, path) in files {
            let key = FileKey::new(version, filename);
            match load_city_file(&path) {
                Ok(record) => {
                    let location = LocationKey::from_city(&record);
                    file_index.insert(key.clone(), record);
                    // Last writer wins on duplicate location keys; the sorted
                    // scan makes that the highest version.
                    location_index.insert(location, key);
                    stats.files_loaded += 1;
                }
                Err(err) => {
                    stats.files_failed += 1;
                    error!(file = %key, "failed to load data file: {err:#}");
                }
            }
        }
    }

    info!(
        files = stats.files_loaded,
        versions = stats.versions_scanned,
        failed = stats.files_failed,
        "loaded route registry"
    );
    RegistrySnapshot::from_parts(file_index, location_index, stats)
}

/// Immediate subdirectories named `v<digits>`, ascending by version.
///
/// Anything else under the root (stray files, hidden directories, names like
/// `v1x`) is ignored entirely. Shared with the draft validator, which walks
/// the drafts root by the same rule.
pub(crate) fn list_version_dirs(root: &Path) -> Result<Vec<(Version, PathBuf)>> {
    let mut dirs = Vec::new();
    for entry in
        fs::read_dir(root).with_context(|| format!("reading store root {}", root.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(version) = Version::from_prefixed(name) {
            dirs.push((version, path));
        }
    }
    dirs.sort_by_key(|(version, _)| *version);
    Ok(dirs)
}

/// Candidate data files in one version directory: `*.json` minus
/// `*.schema.json`, sorted by name.
fn list_data_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".json") || name.ends_with(".schema.json") {
            continue;
        }
        files.push((name.to_string(), path));
    }
    files.sort();
    Ok(files)
}

fn load_city_file(path: &Path) -> Result<City> {
    let meta =
        fs::metadata(path).with_context(|| format!("inspecting {}", path.display()))?;
    if meta.len() > MAX_DATA_FILE_BYTES {
        bail!(
            "{} is {} bytes, over the {MAX_DATA_FILE_BYTES} byte data-file bound",
            path.display(),
            meta.len()
        );
    }
    read_city(path)
}
