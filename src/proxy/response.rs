use crate::models::envelope::{ErrorEnvelope, ProxyResponse};
use crate::upstream::UpstreamOutcome;
use http::StatusCode;

pub const FETCH_FAILED: &str = "Failed to fetch data from the API";
pub const FETCH_TIMEOUT: &str = "Timeout while fetching data from the API";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// `API Error: <status> <reason>`; the reason is omitted for codes without a canonical one.
///
/// The reason is always the canonical phrase for the code. A custom reason
/// phrase sent by upstream on the status line is not forwarded.
pub fn api_error_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("API Error: {} {}", status.as_u16(), reason),
        None => format!("API Error: {}", status.as_u16()),
    }
}

/// Pure mapping from an upstream outcome to the status and body sent to the caller.
pub fn outcome_to_response(outcome: UpstreamOutcome) -> ProxyResponse {
    match outcome {
        UpstreamOutcome::Success(body) => ProxyResponse::product(body),
        UpstreamOutcome::StructuredError { status, body } => ProxyResponse::error(
            status,
            ErrorEnvelope::with_details(api_error_message(status), body),
        ),
        UpstreamOutcome::UnstructuredError { status } => ProxyResponse::error(
            status,
            ErrorEnvelope::new(format!("{} (Non-JSON response)", api_error_message(status))),
        ),
        UpstreamOutcome::TransportFailure(_) => ProxyResponse::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorEnvelope::new(FETCH_FAILED),
        ),
        UpstreamOutcome::Timeout => {
            ProxyResponse::error(StatusCode::GATEWAY_TIMEOUT, ErrorEnvelope::new(FETCH_TIMEOUT))
        }
        UpstreamOutcome::Internal(_) => ProxyResponse::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorEnvelope::new(INTERNAL_ERROR),
        ),
    }
}

impl From<UpstreamOutcome> for ProxyResponse {
    fn from(outcome: UpstreamOutcome) -> Self {
        outcome_to_response(outcome)
    }
}
