//! Run-scoped tracing context.
//!
//! # Design
//! - Every invocation gets a fresh identifier so interleaved log streams from
//!   scheduled runs can be told apart.
//! - The span is returned rather than entered; async callers attach it with
//!   `Instrument` so it survives across awaits.

use tracing::Span;
use uuid::Uuid;

use crate::init::build_sha;

/// Fresh identifier for one invocation.
#[must_use]
pub fn new_run_id() -> Uuid {
    Uuid::new_v4()
}

/// Root span for one reconciliation run.
#[must_use]
pub fn run_span(run_id: Uuid, dry_run: bool) -> Span {
    tracing::info_span!("run", run_id = %run_id, dry_run, build_sha = %build_sha())
}
