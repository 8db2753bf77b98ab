//! The JSON response envelope.
//!
//! Every endpoint answers `{success, response?, message?, error?}`;
//! absent fields are omitted rather than serialized as null.

use axum::Json;
use serde::Serialize;

/// The standard response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// The payload, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
    /// Human-readable note (success confirmations, failure reasons).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Generic error text for server-side failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A successful response with a payload.
    pub fn ok(response: T) -> Json<Self> {
        Json(Self {
            success: true,
            response: Some(response),
            message: None,
            error: None,
        })
    }

    /// A successful response with a payload and a confirmation message.
    pub fn ok_with_message(response: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            response: Some(response),
            message: Some(message.into()),
            error: None,
        })
    }
}

impl ApiResponse<serde_json::Value> {
    /// A failure envelope. Used by the error type; handlers return errors
    /// instead of building this directly.
    #[must_use]
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            response: None,
            message: Some(message.into()),
            error,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_omits_absent_fields() {
        let Json(body) = ApiResponse::ok(serde_json::json!({"n": 1}));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "response": {"n": 1}})
        );
    }

    #[test]
    fn test_ok_with_message() {
        let Json(body) = ApiResponse::ok_with_message(serde_json::json!([]), "done");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "response": [], "message": "done"})
        );
    }

    #[test]
    fn test_failure_shape() {
        let body = ApiResponse::failure("nope", Some("internal".to_owned()));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "nope", "error": "internal"})
        );
    }
}
