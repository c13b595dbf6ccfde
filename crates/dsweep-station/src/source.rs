//! Paginated task listing with bounded retry.

use std::num::NonZeroU32;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use dsweep_core::{Page, TaskSource};

use crate::error::{StationError, StationResult};
use crate::wire::{Envelope, TASK_ADDITIONAL, TASK_API, TASK_PATH, TaskListData};

const LIST_OPERATION: &str = "task.list";

/// [`TaskSource`] backed by `SYNO.DownloadStation.Task` `list` calls.
#[derive(Debug, Clone)]
pub struct StationTaskSource {
    client: Client,
    base_url: Url,
    sid: Option<String>,
    retry_limit: u32,
}

impl StationTaskSource {
    /// Create a source over an already-authenticated client.
    ///
    /// `retry_limit` is the total number of attempts per page; values below one
    /// are treated as one.
    #[must_use]
    pub fn new(client: Client, base_url: Url, sid: Option<String>, retry_limit: u32) -> Self {
        Self {
            client,
            base_url,
            sid,
            retry_limit: retry_limit.max(1),
        }
    }

    /// Attempts made per page before giving up.
    #[must_use]
    pub const fn retry_limit(&self) -> u32 {
        self.retry_limit
    }

    async fn list_once(
        &self,
        offset: u32,
        limit: NonZeroU32,
    ) -> StationResult<Envelope<TaskListData>> {
        let mut url = endpoint(&self.base_url, TASK_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("api", TASK_API)
                .append_pair("version", "1")
                .append_pair("method", "list")
                .append_pair("additional", TASK_ADDITIONAL)
                .append_pair("offset", &offset.to_string())
                .append_pair("limit", &limit.to_string());
            if let Some(sid) = &self.sid {
                pairs.append_pair("_sid", sid);
            }
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| StationError::http(LIST_OPERATION, err))?;
        decode_envelope(LIST_OPERATION, response).await
    }
}

#[async_trait]
impl TaskSource for StationTaskSource {
    type Error = StationError;

    async fn fetch_page(&self, offset: u32, limit: NonZeroU32) -> StationResult<Page> {
        let mut attempt = 1;
        loop {
            debug!(offset, limit = limit.get(), attempt, "listing download station tasks");
            match self.list_once(offset, limit).await {
                Ok(envelope) if envelope.success => {
                    let tasks = envelope.data.map(|data| data.tasks).unwrap_or_default();
                    debug!(offset, received = tasks.len(), "task page received");
                    return Ok(Page::from_tasks(tasks));
                }
                Ok(envelope) => {
                    return Err(StationError::Rejected {
                        operation: LIST_OPERATION,
                        code: envelope.error_code(),
                    });
                }
                Err(err) if err.is_retryable() && attempt < self.retry_limit => {
                    warn!(
                        offset,
                        attempt,
                        attempts = self.retry_limit,
                        error = %err,
                        "task page request failed; retrying"
                    );
                    attempt += 1;
                }
                Err(err) if err.is_retryable() => {
                    return Err(StationError::RetriesExhausted {
                        offset,
                        attempts: attempt,
                        source: Box::new(err),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }
}

pub(crate) fn endpoint(base_url: &Url, path: &'static str) -> StationResult<Url> {
    base_url
        .join(path)
        .map_err(|source| StationError::InvalidUrl {
            endpoint: path,
            source,
        })
}

pub(crate) async fn decode_envelope<T: DeserializeOwned>(
    operation: &'static str,
    response: Response,
) -> StationResult<Envelope<T>> {
    let status = response.status();
    if !status.is_success() {
        return Err(StationError::HttpStatus {
            operation,
            status: status.as_u16(),
        });
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|err| StationError::http(operation, err))?;
    serde_json::from_slice(&bytes).map_err(|source| StationError::Decode { operation, source })
}
