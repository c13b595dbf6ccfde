//! # Design
//!
//! - One enum for every failure the adapter can surface.
//! - `operation` names the web API call so failures are traceable without URLs,
//!   which may carry credentials in their query string.
//! - Transport and decode failures are retryable; rejections are not.

use thiserror::Error;

use crate::wire::describe_code;

/// Result alias for adapter operations.
pub type StationResult<T> = Result<T, StationError>;

/// Errors produced while talking to Download Station.
#[derive(Debug, Error)]
pub enum StationError {
    /// The configured base URL could not be joined with an endpoint path.
    #[error("invalid station endpoint {endpoint}")]
    InvalidUrl {
        /// Endpoint path being joined.
        endpoint: &'static str,
        /// Underlying URL parse error.
        source: url::ParseError,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build http client")]
    ClientBuild {
        /// Underlying client error.
        source: reqwest::Error,
    },
    /// The request could not be sent or its body could not be read.
    #[error("station request {operation} failed")]
    Http {
        /// Web API call being made.
        operation: &'static str,
        /// Underlying transport error, stripped of its URL.
        source: reqwest::Error,
    },
    /// The service answered with a non-success HTTP status.
    #[error("station request {operation} returned http status {status}")]
    HttpStatus {
        /// Web API call being made.
        operation: &'static str,
        /// HTTP status code returned.
        status: u16,
    },
    /// The response body was not the expected JSON document.
    #[error("station response to {operation} could not be decoded")]
    Decode {
        /// Web API call being made.
        operation: &'static str,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The service answered with `success: false`.
    #[error("station rejected {operation}{}", describe_code(.code.as_ref()))]
    Rejected {
        /// Web API call being made.
        operation: &'static str,
        /// Service error code when present.
        code: Option<i64>,
    },
    /// The service refused the login.
    #[error("station login rejected{}", describe_code(.code.as_ref()))]
    AuthRejected {
        /// Service error code when present.
        code: Option<i64>,
    },
    /// Every attempt at a page request failed.
    #[error("task page at offset {offset} failed after {attempts} attempts")]
    RetriesExhausted {
        /// Offset of the page.
        offset: u32,
        /// Attempts made.
        attempts: u32,
        /// Failure from the final attempt.
        source: Box<StationError>,
    },
}

impl StationError {
    pub(crate) fn http(operation: &'static str, source: reqwest::Error) -> Self {
        Self::Http {
            operation,
            source: source.without_url(),
        }
    }

    /// Whether a fresh attempt at the same request could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::HttpStatus { .. } | Self::Decode { .. }
        )
    }
}
