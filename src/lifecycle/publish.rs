//! One-way promotion of a draft into the published store.
//!
//! Publishing copies `registry/next/v<N>` to `registry/data/v<N>` after two
//! gates: the draft must exist, and the published target must not. There is
//! no republish and no in-place edit; the published tree only ever grows new
//! version directories.

use crate::registry::keys::Version;
use crate::{drafts_root, published_root};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Clone, Debug)]
/// Where a publish landed and how much it copied.
pub struct PublishOutcome {
    pub version: Version,
    pub source: PathBuf,
    pub target: PathBuf,
    pub files_copied: usize,
}

/// Publish draft `version`, refusing to touch an existing published version.
///
/// The target-absence check runs before any copy, so a conflict leaves the
/// published tree byte-for-byte untouched.
pub fn publish_draft(repo_root: &Path, version: Version) -> Result<PublishOutcome> {
    let source = drafts_root(repo_root).join(version.dir_name());
    if !source.is_dir() {
        bail!(
            "draft {} not found at {}; create it with the draft command first",
            version.dir_name(),
            source.display()
        );
    }

    let published = published_root(repo_root);
    let target = published.join(version.dir_name());
    if target.exists() {
        bail!(
            "version {} is already published at {}; published versions are immutable, \
             publish your changes as v{} instead",
            version.dir_name(),
            target.display(),
            version.0 + 1
        );
    }

    fs::create_dir_all(&published)
        .with_context(|| format!("creating {}", published.display()))?;
    let files_copied = copy_dir_recursive(&source, &target)?;

    info!(
        version = %version.dir_name(),
        files = files_copied,
        target = %target.display(),
        "published draft"
    );
    Ok(PublishOutcome {
        version,
        source,
        target,
        files_copied,
    })
}

fn copy_dir_recursive(source: &Path, target: &Path) -> Result<usize> {
    fs::create_dir_all(target).with_context(|| format!("creating {}", target.display()))?;
    let mut copied = 0;
    for entry in
        fs::read_dir(source).with_context(|| format!("reading {}", source.display()))?
    {
        let entry = entry?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        if from.is_dir() {
            copied += copy_dir_recursive(&from, &to)?;
        } else {
            fs::copy(&from, &to)
                .with_context(|| format!("copying {} to {}", from.display(), to.display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}
