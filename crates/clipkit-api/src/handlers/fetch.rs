//! Metadata lookup and stream download handlers.

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use clipkit_fetch::{DownloadRequest, VideoInfo};
use clipkit_media::Workspace;

use crate::error::{ApiError, ApiResult};
use crate::handlers::attachment_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InfoBody {
    #[serde(default)]
    pub url: Option<String>,
}

/// POST /info/ — resolve metadata and downloadable formats for a URL.
pub async fn info(Json(body): Json<InfoBody>) -> ApiResult<Json<VideoInfo>> {
    let url = require_url(body.url)?;
    let info = clipkit_fetch::video_info(&url).await?;
    Ok(Json(info))
}

#[derive(Debug, Deserialize)]
pub struct DownloadBody {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub audio_only: bool,
}

/// POST /download/ — download the selected stream and return it inline.
///
/// The download lands in a request workspace that is removed when the
/// handler returns, so nothing accumulates on disk.
pub async fn download(
    State(state): State<AppState>,
    Json(body): Json<DownloadBody>,
) -> ApiResult<Response> {
    let url = require_url(body.url)?;

    let format_id = if body.audio_only {
        body.format_id.unwrap_or_default()
    } else {
        body.format_id
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request("format_id is required"))?
    };

    let workspace = Workspace::create()?;

    let request = DownloadRequest {
        url,
        format_id,
        audio_only: body.audio_only,
        ffmpeg_location: Some(state.tools.ffmpeg.clone()),
    };

    let download = clipkit_fetch::download(&request, workspace.path()).await?;
    let bytes = tokio::fs::read(&download.path).await?;

    info!(
        filename = %download.filename,
        size = bytes.len(),
        "Download complete"
    );
    attachment_response(bytes, download.content_type, &download.filename)
}

fn require_url(url: Option<String>) -> ApiResult<String> {
    url.map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("URL is required"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_url() {
        assert_eq!(require_url(Some("http://x".into())).unwrap(), "http://x");
        assert!(require_url(Some("  ".into())).is_err());
        assert!(require_url(None).is_err());
    }
}
