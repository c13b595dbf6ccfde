//! Default tuning values applied when the caller does not override them.
//!
//! # Design
//! - Values mirror what the Download Station web API tolerates comfortably.
//! - Keep every knob here so the CLI and tests agree on the same baseline.

/// Number of tasks requested per page.
pub const DEFAULT_BATCH_SIZE: u32 = 10;
/// Offset ceiling that stops pagination even if the service never reports end-of-data.
pub const DEFAULT_PAGE_CEILING: u32 = 1_000;
/// Total attempts made for a single page request before giving up.
pub const DEFAULT_RETRY_LIMIT: u32 = 2;
/// Per-request HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 1;
