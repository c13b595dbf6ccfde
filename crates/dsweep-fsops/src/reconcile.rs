//! Set difference between the task queue and the source directory, and the
//! moves that follow from it.
//!
//! # Design
//! - `plan` is pure: it never touches the filesystem.
//! - `apply` checks the destination once, then moves entries in plan order.
//! - The first failing move stops the batch. Completed moves stay where they are.
//! - An occupied target is an error, never an overwrite.

use std::io;
use std::path::{Path, PathBuf};

use dsweep_config::SyncConfig;
use dsweep_core::TaskSet;
use tracing::{debug, info, warn};

use crate::error::{FsOpsError, FsOpsResult};
use crate::model::{FilesystemEntry, Relocation, RelocationPlan, RelocationReport};
use crate::scan::scan_entries;

/// Moves a single top-level entry.
pub trait Mover {
    /// Rename `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// [`Mover`] backed by [`std::fs::rename`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StdMover;

impl Mover for StdMover {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }
}

/// Reconciles a source directory against the known task titles.
#[derive(Debug, Clone)]
pub struct Reconciler<M = StdMover> {
    source_directory: PathBuf,
    destination_directory: PathBuf,
    mover: M,
}

impl Reconciler<StdMover> {
    /// Reconciler moving entries from `source_directory` into `destination_directory`.
    #[must_use]
    pub fn new(
        source_directory: impl Into<PathBuf>,
        destination_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_directory: source_directory.into(),
            destination_directory: destination_directory.into(),
            mover: StdMover,
        }
    }

    /// Reconciler over the directories named in `config`.
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(
            config.source_directory.clone(),
            config.destination_directory.clone(),
        )
    }
}

impl<M: Mover> Reconciler<M> {
    /// Replace the mover used by [`Reconciler::apply`].
    #[must_use]
    pub fn with_mover<N: Mover>(self, mover: N) -> Reconciler<N> {
        Reconciler {
            source_directory: self.source_directory,
            destination_directory: self.destination_directory,
            mover,
        }
    }

    /// Directory entries are read from.
    #[must_use]
    pub fn source_directory(&self) -> &Path {
        &self.source_directory
    }

    /// Directory orphaned entries are moved into.
    #[must_use]
    pub fn destination_directory(&self) -> &Path {
        &self.destination_directory
    }

    /// Scan the source directory.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::Io`] when the directory cannot be read.
    pub fn scan(&self) -> FsOpsResult<Vec<FilesystemEntry>> {
        scan_entries(&self.source_directory)
    }

    /// Moves for every entry whose name is not a task title.
    ///
    /// Names that are not valid UTF-8 never match a title.
    #[must_use]
    pub fn plan(&self, tasks: &TaskSet, entries: Vec<FilesystemEntry>) -> RelocationPlan {
        let mut plan = RelocationPlan::default();
        for entry in entries {
            if entry.title_key().is_some_and(|title| tasks.contains(title)) {
                plan.retained += 1;
                continue;
            }
            let step = Relocation {
                from: self.source_directory.join(&entry.name),
                to: self.destination_directory.join(&entry.name),
                name: entry.name,
                is_dir: entry.is_dir,
            };
            debug!(
                from = %step.from.display(),
                to = %step.to.display(),
                "entry has no matching task"
            );
            plan.steps.push(step);
        }
        plan
    }

    /// Perform every move in `plan`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::NotADirectory`] before any move when the
    /// destination is missing or not a directory. A failing step yields
    /// [`FsOpsError::Interrupted`] wrapping either
    /// [`FsOpsError::DestinationExists`] or [`FsOpsError::Io`]; the steps
    /// before it remain applied and the steps after it are not attempted.
    pub fn apply(&self, plan: &RelocationPlan) -> FsOpsResult<RelocationReport> {
        if plan.is_empty() {
            debug!("nothing to relocate");
            return Ok(RelocationReport::default());
        }
        self.ensure_destination()?;

        let mut report = RelocationReport::default();
        for step in &plan.steps {
            if let Err(err) = self.relocate(step) {
                warn!(
                    completed = report.moved.len(),
                    planned = plan.len(),
                    error = %err,
                    "relocation stopped"
                );
                return Err(FsOpsError::Interrupted {
                    completed: report.moved.len(),
                    planned: plan.len(),
                    source: Box::new(err),
                });
            }
            info!(
                from = %step.from.display(),
                to = %step.to.display(),
                is_dir = step.is_dir,
                "relocated entry"
            );
            report.moved.push(step.clone());
        }
        Ok(report)
    }

    fn ensure_destination(&self) -> FsOpsResult<()> {
        match std::fs::metadata(&self.destination_directory) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(FsOpsError::NotADirectory {
                path: self.destination_directory.clone(),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(FsOpsError::NotADirectory {
                path: self.destination_directory.clone(),
            }),
            Err(source) => Err(FsOpsError::io(
                "apply.inspect_destination",
                &self.destination_directory,
                source,
            )),
        }
    }

    fn relocate(&self, step: &Relocation) -> FsOpsResult<()> {
        match std::fs::symlink_metadata(&step.to) {
            Ok(_) => {
                return Err(FsOpsError::DestinationExists {
                    path: step.to.clone(),
                });
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(FsOpsError::io("apply.inspect_target", &step.to, source)),
        }
        self.mover
            .rename(&step.from, &step.to)
            .map_err(|source| FsOpsError::io("apply.rename", &step.from, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use dsweep_core::{Task, TaskStatus};

    #[derive(Default)]
    struct RecordingMover {
        calls: RefCell<Vec<PathBuf>>,
    }

    impl Mover for RecordingMover {
        fn rename(&self, from: &Path, _to: &Path) -> io::Result<()> {
            self.calls.borrow_mut().push(from.to_path_buf());
            Ok(())
        }
    }

    fn tasks(titles: &[&str]) -> anyhow::Result<TaskSet> {
        Ok(TaskSet::try_from_tasks(
            titles
                .iter()
                .map(|title| Task::new(*title, TaskStatus::Seeding)),
        )?)
    }

    #[test]
    fn plan_keeps_entries_with_matching_titles() -> anyhow::Result<()> {
        let reconciler = Reconciler::new("/volume/pt", "/volume/ptshare");
        let entries = vec![
            FilesystemEntry::new("Movie.A", true),
            FilesystemEntry::new("Movie.B", false),
        ];

        let plan = reconciler.plan(&tasks(&["Movie.A"])?, entries);

        assert_eq!(plan.len(), 1);
        assert_eq!(plan.retained, 1);
        let step = &plan.steps[0];
        assert_eq!(step.name, "Movie.B");
        assert_eq!(step.from, PathBuf::from("/volume/pt/Movie.B"));
        assert_eq!(step.to, PathBuf::from("/volume/ptshare/Movie.B"));
        assert!(!step.is_dir);
        Ok(())
    }

    #[test]
    fn dropped_tasks_do_not_protect_entries() -> anyhow::Result<()> {
        let set = TaskSet::try_from_tasks([Task::new("Movie.A", TaskStatus::Error)])?;
        let reconciler = Reconciler::new("/src", "/dst");

        let plan = reconciler.plan(&set, vec![FilesystemEntry::new("Movie.A", true)]);

        assert_eq!(plan.len(), 1);
        Ok(())
    }

    #[test]
    fn titles_match_exactly() -> anyhow::Result<()> {
        let reconciler = Reconciler::new("/src", "/dst");
        let entries = vec![
            FilesystemEntry::new("movie.a", false),
            FilesystemEntry::new("Movie.A ", false),
        ];

        let plan = reconciler.plan(&tasks(&["Movie.A"])?, entries);

        assert_eq!(plan.len(), 2);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_always_orphaned() -> anyhow::Result<()> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"Movie.\xff");
        let reconciler = Reconciler::new("/src", "/dst");

        let plan = reconciler.plan(&tasks(&["Movie."])?, vec![FilesystemEntry::new(name, false)]);

        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps[0].to, Path::new("/dst").join(name));
        Ok(())
    }

    #[test]
    fn empty_plan_skips_destination_check() -> anyhow::Result<()> {
        let reconciler = Reconciler::new("/src", "/definitely/not/here");
        let report = reconciler.apply(&RelocationPlan::default())?;
        assert!(report.moved.is_empty());
        Ok(())
    }

    #[test]
    fn apply_uses_injected_mover_in_plan_order() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let reconciler =
            Reconciler::new("/src", dir.path()).with_mover(RecordingMover::default());
        let plan = reconciler.plan(
            &TaskSet::default(),
            vec![
                FilesystemEntry::new("a", false),
                FilesystemEntry::new("b", true),
            ],
        );

        let report = reconciler.apply(&plan)?;

        assert_eq!(report.moved.len(), 2);
        assert_eq!(
            *reconciler.mover.calls.borrow(),
            vec![PathBuf::from("/src/a"), PathBuf::from("/src/b")]
        );
        Ok(())
    }
}
