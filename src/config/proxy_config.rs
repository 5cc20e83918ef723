use serde::Deserialize;

/// Represents the configuration for the proxy
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ProxyConfig {
    pub id: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Default log level for the proxy configuration
fn default_log_level() -> String {
    "info".to_string()
}

/// Where the ingestion command finds the proxy and the persistence backend.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub backend_url: String,
    pub proxy_url: String,
}
