//! # Error Types
//!
//! The failure payload shared by the API client, the workflows and the
//! entity store.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// A failed API call: transport error or non-2xx status.
///
/// `error` is what the store records as the resource's last error.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("API call failed (status {status:?}): {error}")]
pub struct ApiFailure {
    /// HTTP status, absent for transport failures.
    pub status: Option<u16>,
    /// Error payload: the response body for HTTP errors, a message object
    /// for transport errors.
    pub error: Value,
}

impl ApiFailure {
    /// A failure that never produced an HTTP response.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            error: json!({ "message": message.into() }),
        }
    }

    /// A non-2xx HTTP response.
    #[must_use]
    pub fn http(status: u16, body: Value) -> Self {
        let error = if body.is_null() {
            json!({ "code": status })
        } else {
            body
        };
        Self {
            status: Some(status),
            error,
        }
    }

    /// The whole failure as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({ "status": self.status, "error": self.error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_has_no_status() {
        let failure = ApiFailure::transport("connection refused");
        assert_eq!(failure.status, None);
        assert_eq!(failure.error["message"], json!("connection refused"));
    }

    #[test]
    fn test_http_failure_with_empty_body_uses_code() {
        let failure = ApiFailure::http(500, Value::Null);
        assert_eq!(failure.error, json!({ "code": 500 }));
    }

    #[test]
    fn test_to_value_carries_whole_payload() {
        let failure = ApiFailure::http(404, json!({"message": "not found"}));
        assert_eq!(
            failure.to_value(),
            json!({"status": 404, "error": {"message": "not found"}})
        );
    }

    #[test]
    fn test_display() {
        let failure = ApiFailure::http(422, json!("invalid query"));
        assert_eq!(
            failure.to_string(),
            "API call failed (status Some(422)): \"invalid query\""
        );
    }
}
