//! Filesystem side of the reconciliation: scanning the source directory and
//! relocating entries that no task accounts for.
#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::multiple_crate_versions)]

pub mod error;
pub mod model;
pub mod reconcile;
pub mod scan;

pub use error::{FsOpsError, FsOpsResult};
pub use model::{FilesystemEntry, Relocation, RelocationPlan, RelocationReport};
pub use reconcile::{Mover, Reconciler, StdMover};
pub use scan::{is_hidden, scan_entries};
