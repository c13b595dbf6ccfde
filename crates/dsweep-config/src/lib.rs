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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Explicit run configuration for the reconciliation pipeline.
//!
//! Layout: `model.rs` (typed configuration structures), `validate.rs`
//! (invariant checks), `defaults.rs` (fallback constants), `error.rs`.

pub mod defaults;
pub mod error;
pub mod model;
mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{PagingPolicy, SyncConfig};
