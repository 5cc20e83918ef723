use crate::config::Config;
use crate::proxy::LookupProxy;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub mod router;

pub use router::{build_router, AppState};

/// HTTP adapter
///
/// Wraps the axum server that exposes the lookup proxy.
pub struct HttpAdapter {
    pub bind_addr: SocketAddr,
    pub path_prefix: String,
}

impl HttpAdapter {
    pub fn new(bind_addr: SocketAddr, path_prefix: impl Into<String>) -> Self {
        Self {
            bind_addr,
            path_prefix: path_prefix.into(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            config.bind_addr()?,
            config.network.http.path_prefix.clone(),
        ))
    }

    pub fn router(&self, proxy: LookupProxy) -> Router {
        build_router(proxy, &self.path_prefix)
    }

    /// Bind the listener and serve until `shutdown` is cancelled.
    ///
    /// Binding happens before the task is spawned so that an occupied port
    /// is reported to the caller.
    pub async fn start(
        &self,
        proxy: LookupProxy,
        shutdown: CancellationToken,
    ) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
        let listener = TcpListener::bind(self.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        let app = self.router(proxy);

        tracing::info!("🚀 HTTP adapter listening on {}{}", local_addr, self.path_prefix);

        let handle = tokio::spawn(async move {
            let graceful_shutdown = async move {
                shutdown.cancelled().await;
            };

            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(graceful_shutdown)
                .await
            {
                tracing::error!("HTTP adapter on {} encountered error: {}", local_addr, e);
            }

            tracing::info!("HTTP adapter on {} shut down", local_addr);
        });

        Ok((local_addr, handle))
    }

    pub fn summary(&self) -> String {
        format!(
            "HttpAdapter(bind={}, prefix={})",
            self.bind_addr, self.path_prefix
        )
    }
}
