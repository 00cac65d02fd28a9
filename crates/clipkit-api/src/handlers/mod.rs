//! Request handlers.

pub mod edit;
pub mod fetch;
pub mod health;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;

use crate::error::{ApiError, ApiResult};

/// Build a binary attachment response.
fn attachment_response(
    bytes: Vec<u8>,
    content_type: &str,
    filename: &str,
) -> ApiResult<Response> {
    // Keep the filename header-safe
    let filename: String = filename
        .chars()
        .filter(|c| !matches!(c, '"' | '\r' | '\n'))
        .collect();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(bytes))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {}", e)))
}
