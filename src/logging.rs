//! Tracing setup shared by the binaries.
//!
//! Log lines go to stderr so stdout stays machine-readable (the lookup binary
//! prints raw JSON there). Verbosity comes from `RUST_LOG`, defaulting to
//! `info`, which covers the loader's aggregate counts and the lifecycle
//! steps.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Call once at the top of `main`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
