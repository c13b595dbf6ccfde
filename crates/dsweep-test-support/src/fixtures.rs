//! JSON payloads shaped like the Download Station web API responses.

use serde_json::{Value, json};

/// A task record with full `additional` detail.
#[must_use]
pub fn task_json(title: &str, status: &str) -> Value {
    json!({
        "id": format!("dbid_{}", title.len()),
        "title": title,
        "status": status,
        "size": 1_048_576,
        "type": "bt",
        "username": "admin",
        "additional": {
            "detail": { "completed_time": 1_700_000_000 },
            "file": [{ "filename": format!("{title}/payload.bin") }],
            "transfer": { "size_uploaded": 2_048 }
        }
    })
}

/// Successful `task.cgi?method=list` response carrying `tasks`.
#[must_use]
pub fn list_response(tasks: &[Value]) -> Value {
    json!({
        "success": true,
        "data": {
            "offset": 0,
            "total": tasks.len(),
            "tasks": tasks
        }
    })
}

/// Response whose `success` flag is false, as the service sends on rejection.
#[must_use]
pub fn rejected_response(code: i64) -> Value {
    json!({
        "success": false,
        "error": { "code": code }
    })
}

/// Successful `auth.cgi?method=login` response.
#[must_use]
pub fn login_response(sid: &str) -> Value {
    json!({
        "success": true,
        "data": { "sid": sid }
    })
}

/// Successful response with no payload, as returned by logout.
#[must_use]
pub fn empty_success() -> Value {
    json!({ "success": true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_embeds_tasks() {
        let body = list_response(&[task_json("Movie.A", "seeding")]);
        assert_eq!(body["success"], Value::Bool(true));
        assert_eq!(body["data"]["tasks"][0]["title"], "Movie.A");
        assert_eq!(body["data"]["total"], 1);
    }

    #[test]
    fn rejected_response_carries_code() {
        let body = rejected_response(105);
        assert_eq!(body["success"], Value::Bool(false));
        assert_eq!(body["error"]["code"], 105);
    }
}
