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

//! Transport-agnostic task model and the paginated fetch pipeline.
//!
//! Layout: `model.rs` (task records and status policy), `task_set.rs`
//! (title-keyed collection), `fetcher.rs` (`TaskSource` seam + `TaskFetcher`),
//! `error.rs`.

pub mod error;
pub mod fetcher;
pub mod model;
pub mod task_set;

pub use error::{FetchError, FetchResult};
pub use fetcher::{TaskFetcher, TaskSource};
pub use model::{
    Page, StatusDisposition, Task, TaskAdditional, TaskDetail, TaskFile, TaskStatus, TaskTransfer,
};
pub use task_set::{Admission, TaskSet};
