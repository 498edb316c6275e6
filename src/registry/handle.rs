//! Process-wide handle over the current snapshot.
//!
//! Readers take an `Arc<RegistrySnapshot>` and keep it for as long as they
//! like; reloads build a complete replacement off to the side and swap the
//! reference in one atomic store. No reader ever observes a partially built
//! index, and no snapshot is ever edited in place.

use crate::registry::loader::scan_version_store;
use crate::registry::snapshot::{LoadStats, RegistrySnapshot};
use arc_swap::ArcSwap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load-once, read-many registry over one version store root.
pub struct RouteRegistry {
    root: PathBuf,
    current: ArcSwap<RegistrySnapshot>,
}

impl RouteRegistry {
    /// Scan `root` once and freeze the result.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let current = ArcSwap::from_pointee(scan_version_store(&root));
        Self { root, current }
    }

    /// The snapshot to run queries against. Cheap to take, safe to hold.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.current.load_full()
    }

    /// Root this registry was opened on.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rescan the root and publish the fresh snapshot.
    ///
    /// In-flight readers keep the snapshot they already hold; new calls to
    /// [`RouteRegistry::snapshot`] see the replacement.
    pub fn reload(&self) -> LoadStats {
        let fresh = scan_version_store(&self.root);
        let stats = fresh.stats();
        self.current.store(Arc::new(fresh));
        stats
    }
}
