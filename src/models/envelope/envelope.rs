use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON body returned on every non-success path.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorEnvelope {
    /// Human readable description of the failure.
    pub error: String,
    /// Parsed upstream error body, present only when upstream answered with JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Value) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

/// Status code and JSON body the proxy answers with.
///
/// The body is always a JSON value, so converting into an axum response
/// always yields `application/json`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ProxyResponse {
    /// Upstream product payload, forwarded untouched.
    pub fn product(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn error(status: StatusCode, envelope: ErrorEnvelope) -> Self {
        // ErrorEnvelope only holds a String and a Value, serialisation cannot fail
        let body = serde_json::to_value(&envelope)
            .unwrap_or_else(|_| serde_json::json!({ "error": envelope.error }));
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
