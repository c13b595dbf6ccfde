//! Task records as reported by the download service.
//!
//! # Design
//! - Field names follow the service's JSON so records deserialize directly.
//! - Unknown status strings survive deserialization; the fetcher decides what to do with them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single download-queue record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display title; doubles as the name of the task's top-level entry on disk.
    pub title: String,
    /// Lifecycle state reported by the service; a null or missing value reads as `""`.
    #[serde(default = "TaskStatus::blank", deserialize_with = "nullable_status")]
    pub status: TaskStatus,
    /// Total payload size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Extended detail requested with `additional=detail,file,transfer`.
    #[serde(default)]
    pub additional: Option<TaskAdditional>,
}

impl Task {
    /// Build a bare task without extended detail.
    #[must_use]
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            status,
            size: 0,
            additional: None,
        }
    }

    /// Completion timestamp, when the service recorded one.
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        let seconds = self.additional.as_ref()?.detail.as_ref()?.completed_time;
        if seconds <= 0 {
            return None;
        }
        DateTime::from_timestamp(seconds, 0)
    }

    /// Bytes uploaded so far, when transfer detail was included.
    #[must_use]
    pub fn uploaded_bytes(&self) -> Option<u64> {
        self.additional
            .as_ref()?
            .transfer
            .as_ref()
            .map(|transfer| transfer.size_uploaded)
    }
}

/// Extended task detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAdditional {
    /// Timing detail.
    #[serde(default)]
    pub detail: Option<TaskDetail>,
    /// Files that make up the task payload.
    #[serde(default)]
    pub file: Vec<TaskFile>,
    /// Transfer counters.
    #[serde(default)]
    pub transfer: Option<TaskTransfer>,
}

/// Timing detail for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetail {
    /// Unix timestamp (seconds) at which the download completed; `0` when unfinished.
    #[serde(default)]
    pub completed_time: i64,
}

/// One file inside a task payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFile {
    /// Path of the file relative to the task root.
    pub filename: String,
}

/// Transfer counters for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTransfer {
    /// Bytes uploaded to peers.
    #[serde(default)]
    pub size_uploaded: u64,
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    /// Download complete, uploading to peers.
    Seeding,
    /// Stopped by the user.
    Paused,
    /// Queued and not yet started.
    Waiting,
    /// Download complete, no longer seeding.
    Finished,
    /// The service gave up on the task.
    Error,
    /// Any state string outside the known set, kept verbatim.
    Other(String),
}

/// What the fetch pipeline does with a task in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDisposition {
    /// The task protects its entry on disk.
    Accept,
    /// The task is ignored as if the service never reported it.
    Drop,
    /// The state is unknown and the whole fetch must abort.
    Reject,
}

impl TaskStatus {
    /// Wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Seeding => "seeding",
            Self::Paused => "paused",
            Self::Waiting => "waiting",
            Self::Finished => "finished",
            Self::Error => "error",
            Self::Other(raw) => raw,
        }
    }

    const fn blank() -> Self {
        Self::Other(String::new())
    }

    /// Classification applied while building a task set.
    #[must_use]
    pub const fn disposition(&self) -> StatusDisposition {
        match self {
            Self::Seeding | Self::Paused | Self::Waiting | Self::Finished => {
                StatusDisposition::Accept
            }
            Self::Error => StatusDisposition::Drop,
            Self::Other(_) => StatusDisposition::Reject,
        }
    }
}

fn nullable_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaskStatus, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(TaskStatus::from(raw.unwrap_or_default()))
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "seeding" => Self::Seeding,
            "paused" => Self::Paused,
            "waiting" => Self::Waiting,
            "finished" => Self::Finished,
            "error" => Self::Error,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Tasks on this page, in service order.
    Tasks(Vec<Task>),
    /// The page was empty; there is nothing further to fetch.
    EndOfData,
}

impl Page {
    /// Wrap a page of tasks, mapping an empty page to [`Page::EndOfData`].
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        if tasks.is_empty() {
            Self::EndOfData
        } else {
            Self::Tasks(tasks)
        }
    }
}
