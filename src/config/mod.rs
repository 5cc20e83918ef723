mod proxy_config;
mod logging_config;
mod network_config;
mod upstream_config;
pub mod config;

pub use config::{Config, ConfigError};
pub use logging_config::LoggingConfig;
pub use network_config::{HttpConfig, NetworkConfig};
pub use proxy_config::{CatalogConfig, ProxyConfig};
pub use upstream_config::UpstreamConfig;

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";
