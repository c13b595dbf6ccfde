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
#![allow(clippy::module_name_repetitions)]

//! Synology Download Station adapter.
//!
//! Layout:
//! - `session.rs`: login/logout and the cookie-bearing HTTP client
//! - `source.rs`: `TaskSource` implementation with bounded retry
//! - `wire.rs`: endpoint constants and response envelopes
//! - `error.rs`: adapter error taxonomy

pub mod error;
pub mod session;
pub mod source;
pub mod wire;

pub use error::{StationError, StationResult};
pub use session::StationSession;
pub use source::StationTaskSource;
