//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{edit, fetch, health};
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/info/", post(fetch::info))
        .route("/download/", post(fetch::download))
        .route("/trim/", post(edit::trim))
        .route("/caption/", post(edit::caption))
        .route("/combined/", post(edit::combined))
        .route("/test-ffmpeg/", get(health::test_ffmpeg))
        .route("/health", get(health::health))
        // Uploads are whole videos; raise axum's default multipart cap to
        // the configured limit and enforce it for every body
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
