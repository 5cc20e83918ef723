use crate::models::envelope::{ErrorEnvelope, ProxyResponse};
use crate::models::lookup::LookupRequest;
use crate::proxy::LookupProxy;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;
use http::StatusCode;

pub const ROUTE_NOT_FOUND: &str = "Not found";

/// Shared, read-only state handed to every lookup handler.
#[derive(Clone)]
pub struct AppState {
    pub proxy: LookupProxy,
}

/// Build the lookup router
///
/// Registers `GET {path_prefix}?barcode=...`, `GET {path_prefix}/{barcode}`
/// and a JSON 404 for everything else.
pub fn build_router(proxy: LookupProxy, path_prefix: &str) -> Router {
    let prefix = path_prefix.trim_end_matches('/');
    tracing::debug!("Mounting lookup routes under {}", prefix);

    Router::new()
        .route(prefix, get(lookup_by_query))
        .route(&format!("{}/", prefix), get(lookup_by_query))
        .route(&format!("{}/{{barcode}}", prefix), get(lookup_by_path))
        .fallback(route_not_found)
        .with_state(AppState { proxy })
}

async fn lookup_by_query(
    State(state): State<AppState>,
    query: Result<Query<LookupRequest>, QueryRejection>,
) -> ProxyResponse {
    // an undecodable query string counts as a missing barcode
    let request = query.map(|Query(q)| q).unwrap_or_default();
    state.proxy.lookup_product(request.barcode()).await
}

async fn lookup_by_path(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<LookupRequest>, QueryRejection>,
) -> ProxyResponse {
    // the query parameter wins over the path segment when both are given
    let from_query = query
        .ok()
        .and_then(|Query(q)| q.barcode().map(str::to_string));
    // an undecodable segment counts as a missing barcode
    let barcode = from_query.or_else(|| path.ok().map(|Path(b)| b));
    state.proxy.lookup_product(barcode.as_deref()).await
}

async fn route_not_found() -> ProxyResponse {
    ProxyResponse::error(StatusCode::NOT_FOUND, ErrorEnvelope::new(ROUTE_NOT_FOUND))
}
