use anyhow::{Context, Result, bail};
use opr_registry::{City, CityType, IslandGroup, Route, SubLocalityType, Version, Waypoint};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// The canonical draft schema shipped with the repo, baked in so fixtures
/// never depend on runtime root discovery.
pub const CANONICAL_SCHEMA: &str = include_str!("../../registry/schema/next.schema.json");

/// A fully populated record for `city`, valid against the canonical schema.
pub fn sample_city(city: &str) -> City {
    city_at(IslandGroup::Visayas, "06", "Iloilo", city)
}

/// A record with the given location fields and one short route.
pub fn city_at(island_group: IslandGroup, region_code: &str, province: &str, city: &str) -> City {
    City {
        country: "Philippines".to_string(),
        country_code: "PH".to_string(),
        island_group,
        region: format!("Region {region_code}"),
        region_code: region_code.to_string(),
        province: province.to_string(),
        province_code: "ILO".to_string(),
        city: city.to_string(),
        city_type: CityType::ComponentCity,
        postal_code: "5000".to_string(),
        latitude: 10.7202,
        longitude: 122.5621,
        routes: vec![Route {
            route_code: "01A".to_string(),
            name: format!("{city} Loop"),
            waypoints: vec![
                Waypoint {
                    sequence: 1,
                    sub_locality: "Poblacion".to_string(),
                    sub_locality_type: SubLocalityType::Barangay,
                    street: "Rizal Street".to_string(),
                    destination: vec!["Public Market".to_string()],
                    latitude: 10.7061,
                    longitude: 122.5828,
                },
                Waypoint {
                    sequence: 2,
                    sub_locality: "City Proper".to_string(),
                    sub_locality_type: SubLocalityType::District,
                    street: "General Luna Street".to_string(),
                    destination: vec!["Plaza".to_string(), "Terminal".to_string()],
                    latitude: 10.6944,
                    longitude: 122.5686,
                },
            ],
        }],
    }
}

/// Write one record as pretty JSON under `dir/filename`.
pub fn write_city(dir: &Path, filename: &str, record: &City) -> Result<PathBuf> {
    let path = dir.join(filename);
    let body = serde_json::to_vec_pretty(record)?;
    fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Create `root/v<N>/` with its schema file and the given records.
pub fn write_version(root: &Path, version: u64, files: &[(&str, &City)]) -> Result<PathBuf> {
    let dir = root.join(Version(version).dir_name());
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    fs::write(dir.join(format!("v{version}.schema.json")), CANONICAL_SCHEMA)?;
    for (filename, record) in files {
        write_city(&dir, filename, record)?;
    }
    Ok(dir)
}

/// Temp repo root carrying the `registry/` layout the lifecycle and the
/// binaries expect: the canonical schema plus a manifest sentinel so the
/// root also satisfies `OPR_REGISTRY_ROOT` discovery in child processes.
pub struct TempRegistry {
    dir: TempDir,
}

impl TempRegistry {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let schema_dir = dir.path().join("registry").join("schema");
        fs::create_dir_all(&schema_dir)?;
        fs::write(schema_dir.join("next.schema.json"), CANONICAL_SCHEMA)?;
        fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"fixture\"\n")?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn published_root(&self) -> PathBuf {
        opr_registry::published_root(self.root())
    }

    pub fn drafts_root(&self) -> PathBuf {
        opr_registry::drafts_root(self.root())
    }
}

/// Run a command to completion, failing the test with full output on a
/// non-zero exit.
pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {cmd:?}"))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
