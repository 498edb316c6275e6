//! Schema validation for draft versions.
//!
//! Every draft directory must carry its own `v<N>.schema.json`; each data
//! file in the directory is validated against that compiled schema. Problems
//! are collected per version rather than failing fast, so one broken file
//! does not hide the rest of the report.

use crate::drafts_root;
use crate::registry::keys::Version;
use crate::registry::loader::list_version_dirs;
use anyhow::{Context, Result};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
/// Validation outcome for one draft version.
pub struct VersionReport {
    pub version: Version,
    pub data_files: usize,
    pub problems: Vec<String>,
}

impl VersionReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

#[derive(Debug, Default)]
/// Validation outcomes for every draft under the drafts root.
pub struct ValidationReport {
    pub versions: Vec<VersionReport>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.versions.iter().all(VersionReport::is_clean)
    }

    pub fn problem_count(&self) -> usize {
        self.versions.iter().map(|v| v.problems.len()).sum()
    }
}

/// Validate every draft version against its bundled schema.
///
/// A missing drafts root is an empty report, not an error; there is simply
/// nothing to validate.
pub fn validate_drafts(repo_root: &Path) -> Result<ValidationReport> {
    let root = drafts_root(repo_root);
    if !root.exists() {
        return Ok(ValidationReport::default());
    }

    let mut report = ValidationReport::default();
    for (version, dir) in list_version_dirs(&root)? {
        report.versions.push(validate_version_dir(version, &dir)?);
    }
    Ok(report)
}

fn validate_version_dir(version: Version, dir: &Path) -> Result<VersionReport> {
    let mut problems = Vec::new();
    let schema_name = format!("{}.schema.json", version.dir_name());
    let schema_path = dir.join(&schema_name);

    if !schema_path.is_file() {
        problems.push(format!("missing schema file {schema_name}"));
        return Ok(VersionReport {
            version,
            data_files: 0,
            problems,
        });
    }

    let schema_value = match read_json(&schema_path) {
        Ok(value) => value,
        Err(err) => {
            problems.push(format!("{schema_name}: failed to parse schema JSON: {err:#}"));
            return Ok(VersionReport {
                version,
                data_files: 0,
                problems,
            });
        }
    };

    let compiled = match JSONSchema::compile(&schema_value) {
        Ok(compiled) => compiled,
        Err(err) => {
            problems.push(format!("{schema_name}: invalid schema: {err}"));
            return Ok(VersionReport {
                version,
                data_files: 0,
                problems,
            });
        }
    };

    let mut data_files = 0;
    for (name, path) in list_draft_data_files(dir, &schema_name)? {
        data_files += 1;
        let value = match read_json(&path) {
            Ok(value) => value,
            Err(err) => {
                problems.push(format!("{name}: not valid JSON: {err:#}"));
                continue;
            }
        };
        if let Err(errors) = compiled.validate(&value) {
            for error in errors {
                let pointer = error.instance_path.to_string();
                let at = if pointer.is_empty() { "/" } else { &pointer };
                problems.push(format!("{name}: {at}: {error}"));
            }
        }
    }

    Ok(VersionReport {
        version,
        data_files,
        problems,
    })
}

/// Data files eligible for validation: `.json`, not the schema itself, and
/// not hidden or editor temp files.
fn list_draft_data_files(dir: &Path, schema_name: &str) -> Result<Vec<(String, PathBuf)>> {
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
        if !name.ends_with(".json") || name == schema_name || name.starts_with('.') {
            continue;
        }
        files.push((name.to_string(), path));
    }
    files.sort();
    Ok(files)
}

fn read_json(path: &Path) -> Result<Value> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}
