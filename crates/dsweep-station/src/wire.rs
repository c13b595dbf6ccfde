//! Endpoint constants and response envelopes for the Download Station web API.
//!
//! # Design
//! - Every response shares the `{ success, data, error }` envelope.
//! - `data` and `error` are optional so rejected responses still decode.

use dsweep_core::Task;
use serde::Deserialize;

/// Path of the authentication endpoint.
pub const AUTH_PATH: &str = "/webapi/auth.cgi";
/// Path of the task endpoint.
pub const TASK_PATH: &str = "/webapi/DownloadStation/task.cgi";
/// API identifier for authentication calls.
pub const AUTH_API: &str = "SYNO.API.Auth";
/// API identifier for task calls.
pub const TASK_API: &str = "SYNO.DownloadStation.Task";
/// Session name scoping the login cookie.
pub const SESSION_NAME: &str = "DownloadStation";
/// Extended detail requested with every task listing.
pub const TASK_ADDITIONAL: &str = "detail,file,transfer";

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) success: bool,
    #[serde(default = "Option::default")]
    pub(crate) data: Option<T>,
    #[serde(default)]
    pub(crate) error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    pub(crate) fn error_code(&self) -> Option<i64> {
        self.error.as_ref().map(|error| error.code)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) code: i64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TaskListData {
    #[serde(default)]
    pub(crate) tasks: Vec<Task>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoginData {
    #[serde(default)]
    pub(crate) sid: Option<String>,
}

/// Short description of a documented service error code.
#[must_use]
pub const fn error_code_hint(code: i64) -> Option<&'static str> {
    match code {
        100 => Some("unknown error"),
        101 => Some("invalid parameter"),
        102 => Some("requested API does not exist"),
        103 => Some("requested method does not exist"),
        104 => Some("requested version is not supported"),
        105 => Some("permission denied"),
        106 => Some("session timed out"),
        107 => Some("session interrupted by duplicate login"),
        400 => Some("no such account or incorrect password"),
        401 => Some("account disabled"),
        402 => Some("permission denied"),
        403 => Some("two-step verification required"),
        404 => Some("two-step verification failed"),
        _ => None,
    }
}

pub(crate) fn describe_code(code: Option<&i64>) -> String {
    match code.copied() {
        Some(code) => match error_code_hint(code) {
            Some(hint) => format!(" (code {code}: {hint})"),
            None => format!(" (code {code})"),
        },
        None => String::new(),
    }
}
