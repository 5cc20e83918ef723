use crate::models::envelope::{ErrorEnvelope, ProxyResponse};
use crate::upstream::{ProductLookup, UpstreamOutcome};
use http::StatusCode;
use std::sync::Arc;

pub mod response;


pub use response::outcome_to_response;

pub const BARCODE_REQUIRED: &str = "Barcode is required";

/// Stateless barcode lookup: validates input, makes one upstream call and
/// maps the outcome to a JSON response.
#[derive(Clone)]
pub struct LookupProxy {
    upstream: Arc<dyn ProductLookup>,
}

impl LookupProxy {
    pub fn new(upstream: Arc<dyn ProductLookup>) -> Self {
        Self { upstream }
    }

    #[tracing::instrument(skip(self), fields(request_id = %uuid::Uuid::new_v4()))]
    pub async fn lookup_product(&self, barcode: Option<&str>) -> ProxyResponse {
        let barcode = match barcode.filter(|b| !b.is_empty()) {
            Some(b) => b,
            None => {
                tracing::warn!("Rejecting lookup without a barcode");
                return ProxyResponse::error(
                    StatusCode::BAD_REQUEST,
                    ErrorEnvelope::new(BARCODE_REQUIRED),
                );
            }
        };

        let outcome = self.upstream.lookup(barcode).await;
        log_outcome(&outcome);
        outcome_to_response(outcome)
    }
}

fn log_outcome(outcome: &UpstreamOutcome) {
    match outcome {
        UpstreamOutcome::Success(_) => tracing::info!("Lookup resolved"),
        UpstreamOutcome::StructuredError { status, .. } => {
            tracing::error!("API Error: {} (JSON body)", status)
        }
        UpstreamOutcome::UnstructuredError { status } => {
            tracing::error!("API Error: {} (Non-JSON response)", status)
        }
        UpstreamOutcome::TransportFailure(reason) => {
            tracing::error!("Proxy error: Fetch failed: {}", reason)
        }
        UpstreamOutcome::Timeout => tracing::error!("Proxy error: Timeout"),
        UpstreamOutcome::Internal(reason) => tracing::error!("Proxy error: {}", reason),
    }
}
