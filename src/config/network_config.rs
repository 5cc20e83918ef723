use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub bind_address: String,
    pub bind_port: u16,
    /// Mount point of the lookup routes (`{prefix}?barcode=` and `{prefix}/{barcode}`)
    pub path_prefix: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 3000,
            path_prefix: "/api/product".to_string(),
        }
    }
}
