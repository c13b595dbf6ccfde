//! Paginated task retrieval.
//!
//! # Design
//! - [`TaskSource`] is the seam to the remote service; one call, one page.
//! - [`TaskFetcher`] owns pagination and hands back a fully materialised [`TaskSet`].
//! - Pages are requested strictly one after another.

use std::error::Error;
use std::num::NonZeroU32;

use async_trait::async_trait;
use dsweep_config::PagingPolicy;
use tracing::{debug, info, warn};

use crate::error::{FetchError, FetchResult};
use crate::model::Page;
use crate::task_set::TaskSet;

/// Source of task pages, implemented by transport adapters.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Failure type surfaced when a page cannot be delivered.
    type Error: Error + Send + Sync + 'static;

    /// Fetch the page starting at `offset` holding at most `limit` tasks.
    async fn fetch_page(&self, offset: u32, limit: NonZeroU32) -> Result<Page, Self::Error>;
}

/// Drives a [`TaskSource`] across pages and assembles the task set.
#[derive(Debug)]
pub struct TaskFetcher<S> {
    source: S,
    paging: PagingPolicy,
}

impl<S: TaskSource> TaskFetcher<S> {
    /// Create a fetcher over `source` using the given paging bounds.
    #[must_use]
    pub const fn new(source: S, paging: PagingPolicy) -> Self {
        Self { source, paging }
    }

    /// Borrow the underlying source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every page until end-of-data or the offset ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Source`] when a page cannot be retrieved and
    /// [`FetchError::UnrecognizedStatus`] when any task reports an unknown state.
    /// No partial task set is returned in either case.
    pub async fn fetch_all(&self) -> FetchResult<TaskSet> {
        let limit = self.paging.batch_size;
        let mut tasks = TaskSet::default();
        let mut pages = 0_u32;

        for offset in self.paging.offsets() {
            debug!(offset, limit = limit.get(), "requesting task page");
            let page = self
                .source
                .fetch_page(offset, limit)
                .await
                .map_err(|err| FetchError::from_source(offset, err))?;

            let Page::Tasks(batch) = page else {
                info!(
                    pages,
                    accepted = tasks.len(),
                    dropped = tasks.dropped(),
                    "task list exhausted"
                );
                return Ok(tasks);
            };

            pages += 1;
            debug!(offset, received = batch.len(), "received task page");
            for task in batch {
                tasks.admit(task)?;
            }
        }

        warn!(
            page_ceiling = self.paging.page_ceiling,
            accepted = tasks.len(),
            "page ceiling reached before end of data; task list may be incomplete"
        );
        Ok(tasks)
    }
}
