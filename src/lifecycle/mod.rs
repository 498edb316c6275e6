//! Draft → published workflow.
//!
//! Drafts live under `registry/next/v<N>` and are freely editable; publishing
//! copies a draft into `registry/data/v<N>` exactly once and never again for
//! that number. Nothing here runs on the serving path: the loader only reads
//! whichever root it is handed, and it relies on this module having refused
//! every in-place edit of published data.

pub mod draft;
pub mod publish;
pub mod validate;

pub use draft::{DraftOutcome, DraftRequest, create_draft};
pub use publish::{PublishOutcome, publish_draft};
pub use validate::{ValidationReport, VersionReport, validate_drafts};
