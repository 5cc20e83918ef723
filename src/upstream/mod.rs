use crate::config::UpstreamConfig;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod classify;

pub use classify::{
    body_wanted, classify_upstream_response, is_json_content_type, UpstreamOutcome, UpstreamReply,
};

/// Failures of the upstream exchange itself, before any classification of a reply.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Upstream did not answer within {0:?}")]
    Timeout(Duration),
    #[error("Transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Unexpected upstream failure: {0}")]
    Unexpected(#[source] reqwest::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not carry the bound it gave up on
            UpstreamError::Timeout(Duration::ZERO)
        } else if err.is_builder() || err.is_body() || err.is_decode() {
            UpstreamError::Unexpected(err)
        } else if err.is_connect() || err.is_request() {
            UpstreamError::Transport(err)
        } else {
            UpstreamError::Unexpected(err)
        }
    }
}

impl From<UpstreamError> for UpstreamOutcome {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout(_) => UpstreamOutcome::Timeout,
            UpstreamError::Transport(e) => UpstreamOutcome::TransportFailure(e.to_string()),
            UpstreamError::Client(e) | UpstreamError::Unexpected(e) => {
                UpstreamOutcome::Internal(e.to_string())
            }
        }
    }
}

/// Resolves a barcode against the product-lookup service.
///
/// Implementations make exactly one attempt and never fail: every failure is
/// folded into an [`UpstreamOutcome`].
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn lookup(&self, barcode: &str) -> UpstreamOutcome;
}

/// `ProductLookup` over HTTP, `GET {base_url}/{barcode}`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(UpstreamError::Client)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        }
    }

    /// The barcode is interpolated as received; the URL parser applies its default escaping only.
    pub fn product_url(&self, barcode: &str) -> String {
        format!("{}/{}", self.base_url, barcode)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn exchange(&self, url: &str) -> Result<UpstreamReply, UpstreamError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = if body_wanted(status, content_type.as_deref()) {
            Some(response.bytes().await?.to_vec())
        } else {
            None
        };

        Ok(UpstreamReply {
            status,
            content_type,
            body,
        })
    }
}

#[async_trait]
impl ProductLookup for HttpUpstream {
    async fn lookup(&self, barcode: &str) -> UpstreamOutcome {
        let url = self.product_url(barcode);
        tracing::debug!("Forwarding lookup to {}", url);

        match tokio::time::timeout(self.timeout, self.exchange(&url)).await {
            Err(_elapsed) => UpstreamError::Timeout(self.timeout).into(),
            Ok(Err(err)) => err.into(),
            Ok(Ok(reply)) => classify_upstream_response(&reply),
        }
    }
}
