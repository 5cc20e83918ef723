pub mod adapters;
pub mod config;
pub mod logging;
pub mod models;
pub mod proxy;
pub mod upstream;

use crate::adapters::HttpAdapter;
use crate::config::Config;
use crate::proxy::LookupProxy;
use crate::upstream::HttpUpstream;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Build the lookup proxy backed by the configured upstream.
pub fn build_proxy(config: &Config) -> anyhow::Result<LookupProxy> {
    let upstream = HttpUpstream::new(&config.upstream)?;
    Ok(LookupProxy::new(Arc::new(upstream)))
}

/// Serve the lookup proxy until Ctrl-C.
pub async fn run(config: Config) -> anyhow::Result<()> {
    logging::init(&config)?;

    tracing::info!("🔧 Starting shelfscan '{}'", config.proxy.id);
    tracing::info!(
        "Forwarding lookups to {} (timeout {:?})",
        config.upstream.base_url,
        config.upstream.timeout()
    );

    let proxy = build_proxy(&config)?;
    let adapter = HttpAdapter::from_config(&config)?;
    tracing::debug!("Starting {}", adapter.summary());

    let shutdown = CancellationToken::new();
    let (_addr, handle) = adapter.start(proxy, shutdown.clone()).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");
    shutdown.cancel();
    handle.await?;

    Ok(())
}
