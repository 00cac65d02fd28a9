//! Axum HTTP API server.
//!
//! Exposes metadata lookup and stream download (backed by yt-dlp) and
//! request-scoped video editing (trim, caption burn-in, and the combined
//! pipeline, backed by ffmpeg).

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
