//! Versioned registry of Philippine PUV route data.
//!
//! The crate loads published route files from a version store
//! (`registry/data/v<N>/` directories of one-City JSON files), freezes them
//! into two in-memory indexes, and answers point lookups over that frozen
//! snapshot. Published versions are immutable: fixing data means drafting and
//! publishing a new version number, never editing an existing one. The
//! binaries layer a draft/validate/publish workflow (`opr`) and a query
//! entry point (`opr-lookup`) on top of the library.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod lifecycle;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod query;
pub mod registry;

pub use model::{City, CityType, IslandGroup, Route, SubLocalityType, Waypoint, read_city};
pub use query::{QueryError, find_city_routes};
pub use registry::{
    FileKey, LoadStats, LocationKey, RegistrySnapshot, RouteRegistry, Version, scan_version_store,
};

const ROOT_SENTINEL: &str = "registry/schema/next.schema.json";
const MANIFEST: &str = "Cargo.toml";

/// Returns true when `candidate` looks like the repository root.
///
/// Root detection keys on the canonical draft schema next to the manifest, so
/// the upward search cannot latch onto an unrelated Cargo workspace.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_file() && candidate.join(MANIFEST).is_file()
}

/// Verifies that an explicit `OPR_REGISTRY_ROOT` hint points at a valid repo.
fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository root holding the registry data tree.
///
/// Search order: honor `OPR_REGISTRY_ROOT` if it points at a real repo, fall
/// back to climbing up from the current executable, then use the build-time
/// hint. Callers can treat failure as fatal because the lifecycle binaries
/// cannot run without the repo layout.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("OPR_REGISTRY_ROOT") {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("OPR_REGISTRY_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the registry repository root. Set OPR_REGISTRY_ROOT to the cloned repository."
    );
}

/// The `registry/` data tree under the repo root.
pub fn registry_root(repo_root: &Path) -> PathBuf {
    repo_root.join("registry")
}

/// Published versions: `registry/data/v<N>/`. Immutable once written.
pub fn published_root(repo_root: &Path) -> PathBuf {
    registry_root(repo_root).join("data")
}

/// Draft versions: `registry/next/v<N>/`. Freely editable until published.
pub fn drafts_root(repo_root: &Path) -> PathBuf {
    registry_root(repo_root).join("next")
}

/// The canonical schema copied into every new draft.
pub fn canonical_draft_schema(repo_root: &Path) -> PathBuf {
    registry_root(repo_root).join("schema").join("next.schema.json")
}

/// Which data tree a process serves from.
///
/// Production serves the published store; everything else serves drafts so
/// authors can query work in progress without publishing it. The loader
/// itself is root-agnostic; this only picks the root to hand it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DataEnv {
    Published,
    Drafts,
}

impl DataEnv {
    /// Select from `OPR_ENV`; only the exact value `production` serves
    /// published data.
    pub fn from_env() -> Self {
        match env::var("OPR_ENV") {
            Ok(value) if value == "production" => DataEnv::Published,
            _ => DataEnv::Drafts,
        }
    }

    /// The version store root this environment reads.
    pub fn data_root(self, repo_root: &Path) -> PathBuf {
        match self {
            DataEnv::Published => published_root(repo_root),
            DataEnv::Drafts => drafts_root(repo_root),
        }
    }

    /// Short label for log lines.
    pub fn label(self) -> &'static str {
        match self {
            DataEnv::Published => "published",
            DataEnv::Drafts => "drafts",
        }
    }
}
