//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /              - Entry list with create form
//! POST /post          - Create entry (form), redirects to /
//! POST /delete        - Delete entry (form), redirects to /
//! POST /callback      - LINE webhook
//! GET  /health        - Liveness
//! GET  /health/ready  - Readiness (database ping)
//! ```

pub mod callback;
pub mod entries;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Board routes without state or middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(entries::index))
        .route("/post", post(entries::create))
        .route("/delete", post(entries::delete))
        .route("/callback", post(callback::callback))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// The full application router with request tracing.
pub fn build_router(state: AppState) -> Router {
    routes()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
