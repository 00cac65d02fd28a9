//! API error types.
//!
//! Three-way taxonomy: client input errors map to 400, external-tool
//! failures to 500 with the tool's own diagnostic text (truncated), and
//! unexpected internal errors to 500 carrying only the final line of the
//! error chain so nothing resembling a full trace leaks to the caller.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use clipkit_fetch::FetchError;
use clipkit_media::MediaError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Stderr excerpt cap for upstream tool failures.
const STDERR_EXCERPT_LEN: usize = 1000;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    UpstreamTool(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamTool(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Truncate a diagnostic to its first `limit` characters.
fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Reduce an error display to its final line.
fn last_line(text: &str) -> String {
    text.lines().last().unwrap_or("Unknown error").to_string()
}

impl From<MediaError> for ApiError {
    fn from(e: MediaError) -> Self {
        match e {
            MediaError::FfmpegFailed {
                ref message,
                ref stderr,
                ..
            } => {
                let detail = stderr
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| truncate(s, STDERR_EXCERPT_LEN))
                    .unwrap_or_else(|| message.clone());
                ApiError::UpstreamTool(detail)
            }
            other => ApiError::Internal(last_line(&other.to_string())),
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::FormatUnavailable => ApiError::BadRequest(e.to_string()),
            FetchError::ResolveFailed { message } => ApiError::BadRequest(message),
            FetchError::DownloadFailed { message } => {
                ApiError::BadRequest(format!("Download error: {}", message))
            }
            other => ApiError::Internal(last_line(&other.to_string())),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::BadRequest(format!("Invalid multipart body: {}", e))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Internal(last_line(&e.to_string()))
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UpstreamTool("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_ffmpeg_stderr_truncated() {
        let long_stderr = "x".repeat(5000);
        let err = ApiError::from(MediaError::ffmpeg_failed(
            "FFmpeg exited with non-zero status",
            Some(long_stderr),
            Some(1),
        ));
        match err {
            ApiError::UpstreamTool(detail) => assert_eq!(detail.len(), STDERR_EXCERPT_LEN),
            other => panic!("expected UpstreamTool, got {:?}", other),
        }
    }

    #[test]
    fn test_ffmpeg_without_stderr_keeps_message() {
        let err = ApiError::from(MediaError::ffmpeg_failed("boom", None, None));
        assert!(matches!(err, ApiError::UpstreamTool(d) if d == "boom"));
    }

    #[test]
    fn test_internal_errors_reduced_to_last_line() {
        let err = ApiError::from(MediaError::InvalidVideo(
            "line one\nline two\nline three".to_string(),
        ));
        match err {
            ApiError::Internal(detail) => {
                assert!(detail.contains("line three"));
                assert!(!detail.contains("line one"));
            }
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    #[test]
    fn test_format_unavailable_is_bad_request() {
        let err = ApiError::from(FetchError::FormatUnavailable);
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_resolve_failure_is_bad_request() {
        let err = ApiError::from(FetchError::resolve_failed("Unsupported URL"));
        assert!(matches!(err, ApiError::BadRequest(m) if m == "Unsupported URL"));
    }
}
