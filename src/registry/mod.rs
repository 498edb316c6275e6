//! In-memory route registry.
//!
//! The registry is built in one pass over a version store root (`v<N>`
//! directories of City files), frozen into [`RegistrySnapshot`]'s two
//! indexes, and read thereafter. Published versions are immutable, so a
//! loaded snapshot never needs revalidation; picking up new data means a new
//! scan and an atomic swap through [`RouteRegistry`].

pub mod handle;
pub mod keys;
pub mod loader;
pub mod snapshot;

pub use handle::RouteRegistry;
pub use keys::{FileKey, LocationKey, Version};
pub use loader::scan_version_store;
pub use snapshot::{LoadStats, RegistrySnapshot};
