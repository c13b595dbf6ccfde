//! Title-keyed collection of accepted tasks.
//!
//! # Design
//! - [`TaskSet::admit`] is the only way in; status policy and duplicate-title
//!   policy live there and nowhere else.
//! - Consumers get read-only lookups by title.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::model::{StatusDisposition, Task};

/// What happened to a task offered to [`TaskSet::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The task was new and is now part of the set.
    Accepted,
    /// A task with the same title was already present; the newer record replaced it.
    Replaced,
    /// The task's state excludes it from the set.
    Dropped,
}

/// Accepted tasks keyed by title.
#[derive(Debug, Clone, Default)]
pub struct TaskSet {
    tasks: HashMap<String, Task>,
    dropped: usize,
    replaced: usize,
}

impl TaskSet {
    /// Build a set by admitting each task in order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::UnrecognizedStatus`] for the first task whose
    /// state is outside the known set.
    pub fn try_from_tasks(tasks: impl IntoIterator<Item = Task>) -> FetchResult<Self> {
        let mut set = Self::default();
        for task in tasks {
            set.admit(task)?;
        }
        Ok(set)
    }

    /// Offer a task to the set.
    ///
    /// Duplicate titles keep the most recently admitted record.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::UnrecognizedStatus`] when the task's state is unknown.
    pub fn admit(&mut self, task: Task) -> FetchResult<Admission> {
        match task.status.disposition() {
            StatusDisposition::Reject => Err(FetchError::UnrecognizedStatus {
                status: task.status.to_string(),
                title: task.title,
            }),
            StatusDisposition::Drop => {
                debug!(title = %task.title, status = %task.status, "skipping task");
                self.dropped += 1;
                Ok(Admission::Dropped)
            }
            StatusDisposition::Accept => match self.tasks.entry(task.title.clone()) {
                Entry::Occupied(mut slot) => {
                    warn!(
                        title = %task.title,
                        previous_status = %slot.get().status,
                        status = %task.status,
                        "duplicate task title; keeping the latest record"
                    );
                    slot.insert(task);
                    self.replaced += 1;
                    Ok(Admission::Replaced)
                }
                Entry::Vacant(slot) => {
                    slot.insert(task);
                    Ok(Admission::Accepted)
                }
            },
        }
    }

    /// Whether a task with this title was accepted.
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.tasks.contains_key(title)
    }

    /// Look up an accepted task by title.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Task> {
        self.tasks.get(title)
    }

    /// Number of accepted tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks skipped because of their state.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of records that replaced an earlier record with the same title.
    #[must_use]
    pub const fn replaced(&self) -> usize {
        self.replaced
    }

    /// Accepted titles in arbitrary order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }
}
