//! Editing handlers: trim, caption burn-in, and the combined pipeline.
//!
//! All three follow the same linear shape: read the multipart upload,
//! validate, create a workspace, run the transcoder stage(s), reply with
//! the result as an attachment. The workspace drops (and is removed) on
//! every path out of the handler.

use std::collections::HashMap;

use axum::extract::{Multipart, State};
use axum::response::Response;
use tracing::info;

use clipkit_media::{burn_captions, trim_video, TrimRange, Workspace};

use crate::error::{ApiError, ApiResult};
use crate::handlers::attachment_response;
use crate::state::AppState;

/// Default trim range when the fields are omitted.
const DEFAULT_START: f64 = 0.0;
const DEFAULT_END: f64 = 10.0;

/// An uploaded video plus the accompanying form fields.
struct EditUpload {
    filename: String,
    data: Vec<u8>,
    fields: HashMap<String, String>,
}

impl EditUpload {
    fn float_field(&self, name: &str, default: f64) -> ApiResult<f64> {
        match self.fields.get(name) {
            None => Ok(default),
            Some(value) => value.trim().parse().map_err(|_| {
                ApiError::bad_request(format!("Invalid value for '{}'", name))
            }),
        }
    }

    fn text_field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    fn trim_range(&self) -> ApiResult<TrimRange> {
        let range = TrimRange::new(
            self.float_field("start", DEFAULT_START)?,
            self.float_field("end", DEFAULT_END)?,
        );
        if !range.is_valid() {
            return Err(ApiError::bad_request("End time must be after start time"));
        }
        Ok(range)
    }
}

/// Drain a multipart body into an [`EditUpload`].
///
/// The file part must be named `video`; every other part is kept as a text
/// field.
async fn read_upload(mut multipart: Multipart) -> ApiResult<EditUpload> {
    let mut video: Option<(String, Vec<u8>)> = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "video" {
            let filename = field
                .file_name()
                .filter(|f| !f.is_empty())
                .unwrap_or("video.mp4")
                .to_string();
            let data = field.bytes().await?;
            video = Some((filename, data.to_vec()));
        } else if !name.is_empty() {
            fields.insert(name, field.text().await?);
        }
    }

    let (filename, data) =
        video.ok_or_else(|| ApiError::bad_request("Missing 'video' file field"))?;
    if data.is_empty() {
        return Err(ApiError::bad_request("Uploaded video is empty"));
    }

    Ok(EditUpload {
        filename,
        data,
        fields,
    })
}

/// POST /trim/ — extract a time range with stream copy.
pub async fn trim(State(state): State<AppState>, multipart: Multipart) -> ApiResult<Response> {
    let upload = read_upload(multipart).await?;
    let range = upload.trim_range()?;

    let workspace = Workspace::create()?;
    let input = workspace.write_input(&upload.data).await?;

    trim_video(&state.tools, &input, &workspace.output_path(), range).await?;

    let bytes = tokio::fs::read(workspace.output_path()).await?;
    info!(filename = %upload.filename, size = bytes.len(), "Trim complete");
    attachment_response(bytes, "video/mp4", &format!("trimmed_{}", upload.filename))
}

/// POST /caption/ — burn SubRip captions onto the video track.
pub async fn caption(State(state): State<AppState>, multipart: Multipart) -> ApiResult<Response> {
    let upload = read_upload(multipart).await?;

    let workspace = Workspace::create()?;
    let input = workspace.write_input(&upload.data).await?;
    let subtitles = workspace.write_captions(upload.text_field("captions")).await?;

    burn_captions(&state.tools, &input, &subtitles, &workspace.output_path()).await?;

    let bytes = tokio::fs::read(workspace.output_path()).await?;
    info!(filename = %upload.filename, size = bytes.len(), "Caption burn complete");
    attachment_response(bytes, "video/mp4", &format!("captioned_{}", upload.filename))
}

/// POST /combined/ — trim, then burn captions onto the trimmed clip.
pub async fn combined(State(state): State<AppState>, multipart: Multipart) -> ApiResult<Response> {
    let upload = read_upload(multipart).await?;
    let range = upload.trim_range()?;

    let workspace = Workspace::create()?;
    let input = workspace.write_input(&upload.data).await?;

    // Trim with stream copy first so only the kept range is re-encoded
    let trimmed = workspace.trimmed_path();
    trim_video(&state.tools, &input, &trimmed, range).await?;

    let subtitles = workspace.write_captions(upload.text_field("captions")).await?;
    burn_captions(&state.tools, &trimmed, &subtitles, &workspace.output_path()).await?;

    let bytes = tokio::fs::read(workspace.output_path()).await?;
    info!(filename = %upload.filename, size = bytes.len(), "Combined edit complete");
    attachment_response(bytes, "video/mp4", &format!("edited_{}", upload.filename))
}
