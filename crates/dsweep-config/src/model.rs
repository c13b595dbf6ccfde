//! Typed configuration models.
//!
//! # Design
//! - Pure data carriers; nothing here reads the process environment.
//! - Components receive either the whole [`SyncConfig`] or a narrow projection of it.

use std::fmt;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::defaults::{
    DEFAULT_BATCH_SIZE, DEFAULT_PAGE_CEILING, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_LIMIT,
};
use crate::error::ConfigResult;
use crate::validate;

/// Everything a reconciliation run needs to know, gathered in one place.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Base URL of the Download Station host (for example `http://nas.local:5000`).
    pub service_base_url: Url,
    /// Account used to open the `DownloadStation` session.
    pub account: String,
    /// Password for [`SyncConfig::account`].
    pub password: String,
    /// Directory whose entries are matched against task titles.
    pub source_directory: PathBuf,
    /// Directory that receives entries with no matching task.
    pub destination_directory: PathBuf,
    /// Number of tasks requested per page.
    pub batch_size: u32,
    /// Offset at which pagination stops regardless of the remote response.
    pub page_ceiling: u32,
    /// Total attempts for a single page request.
    pub retry_limit: u32,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
}

impl SyncConfig {
    /// Build a configuration with default paging, retry, and timeout values.
    #[must_use]
    pub fn new(
        service_base_url: Url,
        account: impl Into<String>,
        password: impl Into<String>,
        source_directory: impl Into<PathBuf>,
        destination_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            service_base_url,
            account: account.into(),
            password: password.into(),
            source_directory: source_directory.into(),
            destination_directory: destination_directory.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            page_ceiling: DEFAULT_PAGE_CEILING,
            retry_limit: DEFAULT_RETRY_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the page size.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Override the pagination ceiling.
    #[must_use]
    pub const fn with_page_ceiling(mut self, page_ceiling: u32) -> Self {
        self.page_ceiling = page_ceiling;
        self
    }

    /// Override the number of attempts per page.
    #[must_use]
    pub const fn with_retry_limit(mut self, retry_limit: u32) -> Self {
        self.retry_limit = retry_limit;
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Check every invariant and return the configuration unchanged when it holds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::InvalidField`] naming the first field that
    /// violates an invariant.
    pub fn validate(self) -> ConfigResult<Self> {
        validate::validate(&self)?;
        Ok(self)
    }

    /// Paging projection handed to the task fetcher.
    ///
    /// # Errors
    ///
    /// Returns an error when `batch_size` is zero.
    pub fn paging(&self) -> ConfigResult<PagingPolicy> {
        let batch_size = validate::non_zero("batch_size", self.batch_size)?;
        Ok(PagingPolicy {
            batch_size,
            page_ceiling: self.page_ceiling,
        })
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("service_base_url", &self.service_base_url.as_str())
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .field("source_directory", &self.source_directory)
            .field("destination_directory", &self.destination_directory)
            .field("batch_size", &self.batch_size)
            .field("page_ceiling", &self.page_ceiling)
            .field("retry_limit", &self.retry_limit)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Pagination bounds used when walking the remote task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    /// Tasks requested per page; also the offset stride.
    pub batch_size: NonZeroU32,
    /// Pagination stops once the offset reaches this value.
    pub page_ceiling: u32,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            batch_size: NonZeroU32::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroU32::MIN),
            page_ceiling: DEFAULT_PAGE_CEILING,
        }
    }
}

impl PagingPolicy {
    /// Offsets visited by the fetcher, in request order.
    pub fn offsets(self) -> impl Iterator<Item = u32> {
        let stride = self.batch_size.get() as usize;
        (0..self.page_ceiling).step_by(stride)
    }
}
