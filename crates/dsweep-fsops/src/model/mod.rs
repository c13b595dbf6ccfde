//! Domain models for scanning and relocation.
//!
//! # Design
//! - Plain data; no IO handles.
//! - Names stay as OS strings so non-UTF-8 entries can still be moved intact.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// One immediate entry of the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesystemEntry {
    /// Entry name relative to the scanned directory.
    pub name: OsString,
    /// Whether the entry is a directory (symlinks are not followed).
    pub is_dir: bool,
}

impl FilesystemEntry {
    /// Create an entry record.
    #[must_use]
    pub fn new(name: impl Into<OsString>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }

    /// Name as UTF-8, the form task titles are compared against.
    #[must_use]
    pub fn title_key(&self) -> Option<&str> {
        self.name.to_str()
    }
}

/// A single move from the source directory to the destination directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relocation {
    /// Entry name, preserved across the move.
    #[serde(serialize_with = "lossy_os_str")]
    pub name: OsString,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// Current location.
    #[serde(serialize_with = "lossy_path")]
    pub from: PathBuf,
    /// Target location.
    #[serde(serialize_with = "lossy_path")]
    pub to: PathBuf,
}

/// Ordered moves for every entry with no matching task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelocationPlan {
    /// Moves in scan order.
    pub steps: Vec<Relocation>,
    /// Entries that matched a task and stay in place.
    pub retained: usize,
}

impl RelocationPlan {
    /// Whether there is nothing to move.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of planned moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

/// Moves actually performed by a completed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelocationReport {
    /// Completed moves in the order they were applied.
    pub moved: Vec<Relocation>,
}

fn lossy_os_str<S: Serializer>(value: &OsStr, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string_lossy())
}

fn lossy_path<S: Serializer>(value: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string_lossy())
}
