//! Health and diagnostic handlers.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Transcoder diagnostic response.
#[derive(Serialize)]
pub struct FfmpegTestResponse {
    pub status: String,
    pub version: String,
}

/// GET /test-ffmpeg/ — verify the resolved transcoder binary responds.
pub async fn test_ffmpeg(State(state): State<AppState>) -> ApiResult<Json<FfmpegTestResponse>> {
    let version = state
        .tools
        .version()
        .await
        .map_err(|e| ApiError::internal(format!("FFmpeg test failed: {}", e)))?;

    Ok(Json(FfmpegTestResponse {
        status: "success".to_string(),
        version,
    }))
}
