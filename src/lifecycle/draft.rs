//! Draft creation: reserve a version slot, copy in the canonical schema, and
//! seed one starter data file the author then edits.

use crate::model::{City, CityType, IslandGroup, Route, SubLocalityType, Waypoint};
use crate::normalize::filename_slug;
use crate::registry::keys::Version;
use crate::{canonical_draft_schema, drafts_root, published_root};
use anyhow::{Context, Result, bail, ensure};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Clone, Debug)]
/// Location details for a new draft; `version` is the slot the caller asked
/// for, which may not be the slot they get.
pub struct DraftRequest {
    pub version: Version,
    pub island_group: IslandGroup,
    pub region_code: String,
    pub province: String,
    pub city: String,
    pub overwrite: bool,
}

#[derive(Clone, Debug)]
/// Where a created draft landed.
pub struct DraftOutcome {
    pub version: Version,
    /// True when the requested slot was already published and a free slot was
    /// adopted instead.
    pub fell_back: bool,
    pub dir: PathBuf,
    pub schema_file: String,
    pub data_file: String,
}

/// Create a draft version directory with its schema and starter record.
///
/// Published versions are immutable, so a request for an already-published
/// number probes `(version + k) % 10` for the first free slot; when v0
/// through v9 are all published the draft flow has nowhere to go and fails.
/// An existing draft with the same number is only replaced when `overwrite`
/// is set.
pub fn create_draft(repo_root: &Path, request: &DraftRequest) -> Result<DraftOutcome> {
    ensure!(
        request.region_code.len() == 2 && request.region_code.bytes().all(|b| b.is_ascii_digit()),
        "region code must be two digits, e.g. 06"
    );
    ensure!(!request.province.trim().is_empty(), "province is required");
    ensure!(!request.city.trim().is_empty(), "city is required");

    let (version, fell_back) = reserve_version_slot(repo_root, request.version)?;

    let draft_dir = drafts_root(repo_root).join(version.dir_name());
    if draft_dir.exists() {
        if !request.overwrite {
            bail!(
                "draft {} already exists at {}; pass --overwrite to replace it",
                version.dir_name(),
                draft_dir.display()
            );
        }
        fs::remove_dir_all(&draft_dir)
            .with_context(|| format!("removing {}", draft_dir.display()))?;
    }
    fs::create_dir_all(&draft_dir)
        .with_context(|| format!("creating {}", draft_dir.display()))?;

    let schema_source = canonical_draft_schema(repo_root);
    let schema_file = format!("{}.schema.json", version.dir_name());
    fs::copy(&schema_source, draft_dir.join(&schema_file)).with_context(|| {
        format!(
            "copying {} into {}",
            schema_source.display(),
            draft_dir.display()
        )
    })?;

    let data_file = data_file_name(request);
    let mut body = serde_json::to_vec_pretty(&starter_record(request))?;
    body.push(b'\n');
    fs::write(draft_dir.join(&data_file), body)
        .with_context(|| format!("writing {data_file}"))?;

    info!(version = %version.dir_name(), dir = %draft_dir.display(), "created draft");
    Ok(DraftOutcome {
        version,
        fell_back,
        dir: draft_dir,
        schema_file,
        data_file,
    })
}

/// First free slot at or after the requested version, probing modulo 10.
fn reserve_version_slot(repo_root: &Path, requested: Version) -> Result<(Version, bool)> {
    let published = published_root(repo_root);
    if !published.join(requested.dir_name()).exists() {
        return Ok((requested, false));
    }
    for offset in 1..=10 {
        let candidate = Version((requested.0 + offset) % 10);
        if !published.join(candidate.dir_name()).exists() {
            return Ok((candidate, true));
        }
    }
    bail!("versions v0 through v9 are all published; cannot create a new draft")
}

/// `<island>_region-<NN>_<province>_<city>.json`, all components slugged.
fn data_file_name(request: &DraftRequest) -> String {
    format!(
        "{}_region-{}_{}_{}.json",
        filename_slug(request.island_group.as_str()),
        request.region_code,
        filename_slug(&request.province),
        filename_slug(&request.city)
    )
}

/// Minimal record that passes the canonical schema; everything beyond the
/// requested location details is placeholder content for the author.
fn starter_record(request: &DraftRequest) -> City {
    City {
        country: "Philippines".to_string(),
        country_code: "PH".to_string(),
        island_group: request.island_group,
        region: format!("Region {}", request.region_code),
        region_code: request.region_code.clone(),
        province: request.province.clone(),
        province_code: "XX".to_string(),
        city: request.city.clone(),
        city_type: CityType::Municipality,
        postal_code: "0000".to_string(),
        latitude: 0.0,
        longitude: 0.0,
        routes: vec![Route {
            route_code: "01".to_string(),
            name: "New Route".to_string(),
            waypoints: vec![Waypoint {
                sequence: 1,
                sub_locality: "Barangay TBD".to_string(),
                sub_locality_type: SubLocalityType::Barangay,
                street: "Main St".to_string(),
                destination: vec!["Terminal".to_string(), "Robinsons".to_string()],
                latitude: 0.0,
                longitude: 0.0,
            }],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_file_names_follow_the_slug_convention() {
        let request = DraftRequest {
            version: Version(1),
            island_group: IslandGroup::Visayas,
            region_code: "06".to_string(),
            province: "Iloilo".to_string(),
            city: "Iloilo City".to_string(),
            overwrite: false,
        };
        assert_eq!(
            data_file_name(&request),
            "visayas_region-06_iloilo_iloilo-city.json"
        );
    }
}
