use serde::Deserialize;
use std::time::Duration;

/// The third-party product-lookup service the proxy forwards to.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL; the barcode is appended as the final path segment.
    pub base_url: String,
    pub timeout_ms: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://products-test-aci.onrender.com/api/product".to_string(),
            timeout_ms: 10_000,
        }
    }
}
