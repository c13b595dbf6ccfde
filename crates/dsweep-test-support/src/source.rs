//! In-memory [`TaskSource`] that replays a scripted sequence of pages.

use std::collections::VecDeque;
use std::io;
use std::num::NonZeroU32;
use std::sync::Mutex;

use async_trait::async_trait;
use dsweep_core::{Page, Task, TaskSource, TaskStatus};

/// Replays pages in order and records every offset it was asked for.
///
/// Once the script runs out every further request reports end-of-data.
#[derive(Debug, Default)]
pub struct StaticTaskSource {
    pages: Mutex<VecDeque<Result<Vec<Task>, String>>>,
    requests: Mutex<Vec<(u32, u32)>>,
}

impl StaticTaskSource {
    /// Script a sequence of successful pages.
    #[must_use]
    pub fn with_pages(pages: Vec<Vec<Task>>) -> Self {
        Self {
            pages: Mutex::new(pages.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Append a page that fails with `message`.
    #[must_use]
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        if let Ok(mut pages) = self.pages.lock() {
            pages.push_back(Err(message.into()));
        }
        self
    }

    /// `(offset, limit)` pairs requested so far.
    #[must_use]
    pub fn requests(&self) -> Vec<(u32, u32)> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TaskSource for StaticTaskSource {
    type Error = io::Error;

    async fn fetch_page(&self, offset: u32, limit: NonZeroU32) -> Result<Page, io::Error> {
        self.requests
            .lock()
            .map_err(|_| io::Error::other("request log poisoned"))?
            .push((offset, limit.get()));
        let next = self
            .pages
            .lock()
            .map_err(|_| io::Error::other("page script poisoned"))?
            .pop_front();
        match next {
            None => Ok(Page::EndOfData),
            Some(Ok(tasks)) => Ok(Page::from_tasks(tasks)),
            Some(Err(message)) => Err(io::Error::other(message)),
        }
    }
}

/// Build `count` tasks titled `{prefix}.{n}` in the given state.
#[must_use]
pub fn numbered_tasks(prefix: &str, count: usize, status: &TaskStatus) -> Vec<Task> {
    (0..count)
        .map(|index| Task::new(format!("{prefix}.{index}"), status.clone()))
        .collect()
}
