//! Error types for the fetch pipeline.

use std::error::Error;

use thiserror::Error;

/// Failures that abort a fetch before a [`crate::TaskSet`] is produced.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The task source could not deliver a page.
    #[error("task page request at offset {offset} failed")]
    Source {
        /// Offset of the page that failed.
        offset: u32,
        /// Underlying source failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A task reported a lifecycle state outside the known set.
    #[error("unrecognized task status '{status}' for task '{title}'")]
    UnrecognizedStatus {
        /// Title of the offending task.
        title: String,
        /// Raw status string reported by the service.
        status: String,
    },
}

impl FetchError {
    pub(crate) fn from_source(offset: u32, source: impl Error + Send + Sync + 'static) -> Self {
        Self::Source {
            offset,
            source: Box::new(source),
        }
    }
}

/// Convenience alias for fetch results.
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn source_helper_preserves_cause() {
        let err = FetchError::from_source(20, io::Error::other("connection reset"));
        assert!(matches!(err, FetchError::Source { offset: 20, .. }));
        assert_eq!(err.to_string(), "task page request at offset 20 failed");
        let cause = err.source().map(ToString::to_string);
        assert_eq!(cause.as_deref(), Some("connection reset"));
    }

    #[test]
    fn unrecognized_status_names_task() {
        let err = FetchError::UnrecognizedStatus {
            title: "Movie.A".into(),
            status: "archiving".into(),
        };
        assert_eq!(
            err.to_string(),
            "unrecognized task status 'archiving' for task 'Movie.A'"
        );
    }
}
