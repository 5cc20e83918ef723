use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use shelfscan::adapters::HttpAdapter;
use shelfscan::config::{Config, ConfigError};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml).expect("TOML parse error");
    config.validate()?;
    Ok(config)
}

fn get_proxy_config(upstream_base_url: &str, timeout_ms: u64) -> Config {
    load_config_from_str(&format!(
        r#"
        [proxy]
        id = "failure-test"

        [network.http]
        bind_address = "127.0.0.1"
        bind_port = 0

        [upstream]
        base_url = "{}/api/product"
        timeout_ms = {}
    "#,
        upstream_base_url, timeout_ms
    ))
    .expect("valid config")
}

/// Upstream that answers only after `delay`.
async fn build_slow_upstream(delay: Duration) -> String {
    let app = Router::new().route(
        "/api/product/{barcode}",
        get(move || async move {
            tokio::time::sleep(delay).await;
            axum::Json(json!({ "status": true }))
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// An address nothing listens on.
async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Serve the proxy on an ephemeral port and return its lookup URL.
async fn serve_proxy(config: &Config, shutdown: CancellationToken) -> String {
    let proxy = shelfscan::build_proxy(config).expect("proxy builds");
    let adapter = HttpAdapter::from_config(config).expect("adapter config");
    let (addr, _handle) = adapter.start(proxy, shutdown).await.expect("adapter starts");
    format!("http://{}{}", addr, config.network.http.path_prefix)
}

async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.expect("proxy reachable");
    let status = response.status().as_u16();
    let body: Value = response.json().await.expect("proxy always answers JSON");
    (status, body)
}

#[tokio::test]
async fn test_transport_failure() {
    let config = get_proxy_config(&closed_port_url().await, 2000);
    let shutdown = CancellationToken::new();
    let url = serve_proxy(&config, shutdown.clone()).await;

    let (status, body) = get_json(&format!("{}?barcode=8901", url)).await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Failed to fetch data from the API" }));
    shutdown.cancel();
}

#[tokio::test]
async fn test_timeout() {
    let upstream = build_slow_upstream(Duration::from_secs(2)).await;
    let config = get_proxy_config(&upstream, 100);
    let shutdown = CancellationToken::new();
    let url = serve_proxy(&config, shutdown.clone()).await;

    let started = Instant::now();
    let (status, body) = get_json(&format!("{}/8901", url)).await;

    assert_eq!(status, 504);
    assert_eq!(
        body,
        json!({ "error": "Timeout while fetching data from the API" })
    );
    assert!(started.elapsed() < Duration::from_secs(2));
    shutdown.cancel();
}

#[tokio::test]
async fn test_slow_upstream_within_bound_succeeds() {
    let upstream = build_slow_upstream(Duration::from_millis(50)).await;
    let config = get_proxy_config(&upstream, 2000);
    let shutdown = CancellationToken::new();
    let url = serve_proxy(&config, shutdown.clone()).await;

    let (status, body) = get_json(&format!("{}?barcode=8901", url)).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": true }));
    shutdown.cancel();
}

#[tokio::test]
async fn test_adapter_shuts_down_on_cancel() {
    let config = get_proxy_config(&closed_port_url().await, 500);
    let proxy = shelfscan::build_proxy(&config).unwrap();
    let adapter = HttpAdapter::from_config(&config).unwrap();
    let shutdown = CancellationToken::new();

    let (_addr, handle) = adapter.start(proxy, shutdown.clone()).await.unwrap();
    shutdown.cancel();

    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("adapter stops after cancellation")
        .expect("adapter task did not panic");
}
