use crate::config::{CatalogConfig, LoggingConfig, NetworkConfig, ProxyConfig, UpstreamConfig};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Proxy id must not be empty")]
    InvalidProxyID,
    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),
    #[error("Invalid path prefix '{0}': must start with '/' and name a path")]
    InvalidPathPrefix(String),
    #[error("Invalid upstream base_url '{url}': {reason}")]
    InvalidUpstream { url: String, reason: String },
    #[error("Upstream timeout_ms must be greater than zero")]
    InvalidTimeout,
    #[error("Invalid catalog {field} '{url}': {reason}")]
    InvalidCatalog {
        field: &'static str,
        url: String,
        reason: String,
    },
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
}

impl Config {
    /// Read, parse and validate a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.proxy.id.trim().is_empty() {
            return Err(ConfigError::InvalidProxyID);
        }

        self.bind_addr()?;

        let prefix = &self.network.http.path_prefix;
        if !prefix.starts_with('/') || prefix.trim_end_matches('/').is_empty() {
            return Err(ConfigError::InvalidPathPrefix(prefix.clone()));
        }

        validate_http_url(&self.upstream.base_url).map_err(|reason| {
            ConfigError::InvalidUpstream {
                url: self.upstream.base_url.clone(),
                reason,
            }
        })?;

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        if let Some(catalog) = &self.catalog {
            for (field, url) in [
                ("backend_url", &catalog.backend_url),
                ("proxy_url", &catalog.proxy_url),
            ] {
                validate_http_url(url).map_err(|reason| ConfigError::InvalidCatalog {
                    field,
                    url: url.clone(),
                    reason,
                })?;
            }
        }

        Ok(())
    }

    /// Socket address the HTTP adapter binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let http = &self.network.http;
        format!("{}:{}", http.bind_address, http.bind_port)
            .parse()
            .map_err(|_| {
                ConfigError::InvalidBindAddress(format!("{}:{}", http.bind_address, http.bind_port))
            })
    }
}

fn validate_http_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
