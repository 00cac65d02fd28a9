//! Router tests for the validation paths.
//!
//! These cover everything that must be rejected before any external tool
//! is invoked, so they run without ffmpeg or yt-dlp present.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use clipkit_api::{create_router, ApiConfig, AppState};

fn test_router() -> Router {
    create_router(AppState::new(ApiConfig::default()))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}

const BOUNDARY: &str = "clipkit-test-boundary";

/// Build a multipart/form-data body with an optional video part and text fields.
fn multipart_body(video: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some((filename, data)) = video {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"video\"; filename=\"{filename}\"\r\nContent-Type: video/mp4\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(uri: &str, json: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("healthy"));
}

#[tokio::test]
async fn test_info_requires_url() {
    let response = test_router()
        .oneshot(json_request("/info/", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("URL is required"));
}

#[tokio::test]
async fn test_info_rejects_blank_url() {
    let response = test_router()
        .oneshot(json_request("/info/", r#"{"url": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_requires_url() {
    let response = test_router()
        .oneshot(json_request("/download/", r#"{"format_id": "18"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("URL is required"));
}

#[tokio::test]
async fn test_download_requires_format_id_for_video() {
    let response = test_router()
        .oneshot(json_request(
            "/download/",
            r#"{"url": "https://example.com/v"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("format_id"));
}

#[tokio::test]
async fn test_trim_rejects_inverted_range() {
    let body = multipart_body(
        Some(("clip.mp4", b"fake video bytes")),
        &[("start", "10"), ("end", "5")],
    );
    let response = test_router()
        .oneshot(multipart_request("/trim/", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_string(response)
            .await
            .contains("End time must be after start time")
    );
}

#[tokio::test]
async fn test_trim_rejects_equal_range() {
    let body = multipart_body(
        Some(("clip.mp4", b"fake video bytes")),
        &[("start", "5"), ("end", "5")],
    );
    let response = test_router()
        .oneshot(multipart_request("/trim/", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trim_requires_video_field() {
    let body = multipart_body(None, &[("start", "0"), ("end", "5")]);
    let response = test_router()
        .oneshot(multipart_request("/trim/", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("video"));
}

#[tokio::test]
async fn test_trim_rejects_non_numeric_range() {
    let body = multipart_body(
        Some(("clip.mp4", b"fake video bytes")),
        &[("start", "abc"), ("end", "5")],
    );
    let response = test_router()
        .oneshot(multipart_request("/trim/", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_combined_rejects_inverted_range() {
    let body = multipart_body(
        Some(("clip.mp4", b"fake video bytes")),
        &[("start", "20"), ("end", "1"), ("captions", "")],
    );
    let response = test_router()
        .oneshot(multipart_request("/combined/", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_caption_rejects_empty_upload() {
    let body = multipart_body(Some(("clip.mp4", b"")), &[("captions", "1\n")]);
    let response = test_router()
        .oneshot(multipart_request("/caption/", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_body_shape() {
    let response = test_router()
        .oneshot(json_request("/info/", "{}"))
        .await
        .unwrap();

    let body = body_string(response).await;
    let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(parsed.get("detail").is_some());
}

#[tokio::test]
async fn test_unknown_route() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/nonexistent/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
