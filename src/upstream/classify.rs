use http::StatusCode;
use serde_json::Value;

/// Everything the proxy keeps from an upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    /// Raw `Content-Type` header, if upstream sent one.
    pub content_type: Option<String>,
    /// Response body. `None` when the body was deliberately not read.
    pub body: Option<Vec<u8>>,
}

/// Result of one upstream exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutcome {
    /// 2xx with a JSON body.
    Success(Value),
    /// Non-2xx whose body was declared and parsed as JSON.
    StructuredError { status: StatusCode, body: Value },
    /// Non-2xx with any other content type. The body is never inspected.
    UnstructuredError { status: StatusCode },
    /// No response was received (connection refused, DNS failure, reset).
    TransportFailure(String),
    /// The configured deadline elapsed first.
    Timeout,
    /// Anything else: unparseable body, malformed request URL.
    Internal(String),
}

/// Whether the content type announces a JSON body.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// Whether the body of a response with this status and content type must be read.
pub fn body_wanted(status: StatusCode, content_type: Option<&str>) -> bool {
    status.is_success() || is_json_content_type(content_type)
}

pub fn classify_upstream_response(reply: &UpstreamReply) -> UpstreamOutcome {
    let status = reply.status;

    if !status.is_success() && !is_json_content_type(reply.content_type.as_deref()) {
        return UpstreamOutcome::UnstructuredError { status };
    }

    let body = match reply.body.as_deref() {
        Some(bytes) => bytes,
        None => {
            return UpstreamOutcome::Internal(format!(
                "upstream body for status {} was not read",
                status.as_u16()
            ))
        }
    };

    match serde_json::from_slice::<Value>(body) {
        Ok(value) if status.is_success() => UpstreamOutcome::Success(value),
        Ok(value) => UpstreamOutcome::StructuredError {
            status,
            body: value,
        },
        Err(e) => UpstreamOutcome::Internal(format!(
            "upstream returned status {} with an unparseable JSON body: {}",
            status.as_u16(),
            e
        )),
    }
}
