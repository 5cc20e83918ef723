use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use shelfscan::adapters::http::build_router;
use shelfscan::config::{Config, ConfigError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;

fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml).expect("TOML parse error");
    config.validate()?;
    Ok(config)
}

/// Mock product-lookup service. Counts every request it receives.
async fn build_mock_upstream_server() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let app = Router::new().route(
        "/api/product/{barcode}",
        get(
            move |axum::extract::Path(barcode): axum::extract::Path<String>| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    match barcode.as_str() {
                        "missing" => (
                            StatusCode::NOT_FOUND,
                            axum::Json(json!({ "message": "not found" })),
                        )
                            .into_response(),
                        "html" => (
                            StatusCode::BAD_GATEWAY,
                            [(header::CONTENT_TYPE, "text/html")],
                            "<html><body>Bad Gateway</body></html>",
                        )
                            .into_response(),
                        "garbled" => (
                            StatusCode::OK,
                            [(header::CONTENT_TYPE, "application/json")],
                            "{not json",
                        )
                            .into_response(),
                        "unavailable" => (
                            StatusCode::SERVICE_UNAVAILABLE,
                            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
                            r#"{"retry_after":30}"#,
                        )
                            .into_response(),
                        _ => axum::Json(json!({
                            "status": true,
                            "product": {
                                "barcode": barcode.clone(),
                                "material": "Cotton",
                                "description": "Plain white shirt"
                            }
                        }))
                        .into_response(),
                    }
                }
            },
        ),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, hits)
}

fn get_proxy_config(upstream_base_url: &str) -> String {
    format!(
        r#"
        [proxy]
        id = "lookup-test"
        log_level = "info"

        [network.http]
        bind_address = "127.0.0.1"
        bind_port = 0
        path_prefix = "/api/product"

        [upstream]
        base_url = "{}/api/product"
        timeout_ms = 2000
    "#,
        upstream_base_url
    )
}

async fn build_test_router() -> (Router, Arc<AtomicUsize>) {
    let (upstream_url, hits) = build_mock_upstream_server().await;
    let cfg = load_config_from_str(&get_proxy_config(&upstream_url)).expect("valid config");
    let proxy = shelfscan::build_proxy(&cfg).expect("proxy builds");
    (build_router(proxy, &cfg.network.http.path_prefix), hits)
}

async fn call(app: &Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).method("GET").body(Body::empty()).unwrap())
        .await
        .expect("router handled request");

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    let json: Value = serde_json::from_slice(&body).expect("proxy always answers JSON");

    (status, content_type, json)
}

#[tokio::test]
async fn test_missing_barcode_is_rejected_without_upstream_call() {
    let (app, hits) = build_test_router().await;

    for uri in ["/api/product", "/api/product?barcode=", "/api/product?other=1"] {
        let (status, content_type, body) = call(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, json!({ "error": "Barcode is required" }));
    }

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_success_is_passed_through() {
    let (app, hits) = build_test_router().await;

    let (status, _, body) = call(&app, "/api/product?barcode=8901234").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": true,
            "product": {
                "barcode": "8901234",
                "material": "Cotton",
                "description": "Plain white shirt"
            }
        })
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_path_segment_lookup() {
    let (app, _) = build_test_router().await;

    let (status, _, body) = call(&app, "/api/product/4006381333931").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["barcode"], "4006381333931");
}

#[tokio::test]
async fn test_repeated_lookups_are_identical() {
    let (app, hits) = build_test_router().await;

    let (_, _, first) = call(&app, "/api/product?barcode=777").await;
    let (_, _, second) = call(&app, "/api/product?barcode=777").await;

    assert_eq!(first, second);
    // no caching: each lookup reaches upstream
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_structured_upstream_error() {
    let (app, _) = build_test_router().await;

    let (status, _, body) = call(&app, "/api/product?barcode=missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "error": "API Error: 404 Not Found",
            "details": { "message": "not found" }
        })
    );
}

#[tokio::test]
async fn test_structured_error_with_charset() {
    let (app, _) = build_test_router().await;

    let (status, _, body) = call(&app, "/api/product?barcode=unavailable").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "API Error: 503 Service Unavailable");
    assert_eq!(body["details"], json!({ "retry_after": 30 }));
}

#[tokio::test]
async fn test_unstructured_upstream_error() {
    let (app, _) = build_test_router().await;

    let (status, content_type, body) = call(&app, "/api/product?barcode=html").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        json!({ "error": "API Error: 502 Bad Gateway (Non-JSON response)" })
    );
}

#[tokio::test]
async fn test_unparseable_success_body_is_internal_error() {
    let (app, _) = build_test_router().await;

    let (status, _, body) = call(&app, "/api/product?barcode=garbled").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_undecodable_or_empty_path_segment_is_missing_barcode() {
    let (app, hits) = build_test_router().await;

    for uri in ["/api/product/%FF", "/api/product/"] {
        let (status, content_type, body) = call(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, json!({ "error": "Barcode is required" }));
    }

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_query_barcode_rescues_undecodable_path_segment() {
    let (app, _) = build_test_router().await;

    let (status, _, body) = call(&app, "/api/product/%FF?barcode=42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["barcode"], "42");
}

#[tokio::test]
async fn test_unknown_route_answers_json_not_found() {
    let (app, hits) = build_test_router().await;

    for uri in ["/api/product/1/extra", "/elsewhere"] {
        let (status, content_type, body) = call(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, json!({ "error": "Not found" }));
    }

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
