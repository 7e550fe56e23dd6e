use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{request_id_middleware, security_headers_middleware};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::handlers::{
    app::{health_check, index},
    documents::{listing_fragment, listing_json, refresh_handler},
    metrics::metrics,
    upload::upload_handler,
};
use crate::middleware::http_metrics_middleware;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    // Sessions only carry the refresh counter; they die with the process.
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload_handler))
        .route("/refresh", post(refresh_handler))
        .route("/documents", get(listing_fragment))
        .route("/api/documents", get(listing_json))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route_layer(from_fn(http_metrics_middleware))
        .layer(DefaultBodyLimit::max(state.max_request_bytes))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(service_core::middleware::REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost so the trace span sees the request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
