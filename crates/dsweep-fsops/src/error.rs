//! # Design
//!
//! - Structured errors for scanning and relocation.
//! - Capture the operation and path so a failed run says exactly what it was doing.
//! - A failed relocation batch reports how far it got before stopping.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for filesystem operations.
pub type FsOpsResult<T> = Result<T, FsOpsError>;

/// Errors produced while scanning or relocating entries.
#[derive(Debug, Error)]
pub enum FsOpsError {
    /// IO failures while interacting with the filesystem.
    #[error("fsops {operation} failed for {}", path.display())]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The relocation destination is missing or is not a directory.
    #[error("destination {} is not a directory", path.display())]
    NotADirectory {
        /// Offending destination path.
        path: PathBuf,
    },
    /// Something already occupies the relocation target.
    #[error("relocation target {} already exists", path.display())]
    DestinationExists {
        /// Occupied target path.
        path: PathBuf,
    },
    /// A relocation step failed; earlier steps remain applied.
    #[error("relocation stopped after {completed} of {planned} moves")]
    Interrupted {
        /// Steps that completed before the failure.
        completed: usize,
        /// Steps in the plan.
        planned: usize,
        /// Failure of the step that stopped the batch.
        source: Box<FsOpsError>,
    },
}

impl FsOpsError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_helper_builds_variant_with_source() {
        let err = FsOpsError::io("rename", "/volume/pt/Movie.B", io::Error::other("io"));
        assert!(matches!(err, FsOpsError::Io { operation: "rename", .. }));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "fsops rename failed for /volume/pt/Movie.B");
    }

    #[test]
    fn interrupted_chains_step_failure() {
        let err = FsOpsError::Interrupted {
            completed: 1,
            planned: 3,
            source: Box::new(FsOpsError::DestinationExists {
                path: PathBuf::from("/volume/ptshare/Movie.B"),
            }),
        };
        assert_eq!(err.to_string(), "relocation stopped after 1 of 3 moves");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("relocation target /volume/ptshare/Movie.B already exists")
        );
    }
}
