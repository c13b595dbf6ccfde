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
#![allow(clippy::redundant_pub_crate)]

//! Command-line entry point that sweeps untracked downloads out of a
//! Download Station share.
//!
//! Layout:
//! - `cli.rs`: argument parsing, logging setup, and the exit-code decision
//! - `pipeline.rs`: login, fetch, scan, plan, and relocation for one run
//! - `client.rs`: CLI error type and exit codes
//! - `output.rs`: renderers and formatting helpers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod output;
pub(crate) mod pipeline;

pub use cli::{run, run_from};
