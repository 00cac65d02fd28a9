//! Video metadata lookup.
//!
//! Runs `yt-dlp -J` and condenses the dump into the shape the API returns:
//! title, best thumbnail, duration, and a list of downloadable format
//! variants. Variants carrying both video and audio are preferred; when a
//! source offers none (video-only streams), all URL-bearing variants are
//! returned instead so the caller always has something to pick from.

use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{FetchError, FetchResult};

/// Resolved metadata for a video URL.
#[derive(Debug, Clone, Serialize)]
pub struct VideoInfo {
    pub title: String,
    pub thumbnail: String,
    pub duration: f64,
    pub formats: Vec<FormatVariant>,
}

/// One downloadable stream variant.
#[derive(Debug, Clone, Serialize)]
pub struct FormatVariant {
    pub format_id: String,
    pub ext: String,
    pub resolution: String,
    pub filesize: Option<u64>,
    pub note: String,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub has_audio: bool,
}

/// yt-dlp `-J` dump, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct YtDlpDump {
    title: Option<String>,
    duration: Option<f64>,
    #[serde(default)]
    formats: Vec<YtDlpFormat>,
    #[serde(default)]
    thumbnails: Vec<YtDlpThumbnail>,
}

#[derive(Debug, Deserialize)]
struct YtDlpFormat {
    format_id: String,
    url: Option<String>,
    ext: Option<String>,
    resolution: Option<String>,
    filesize: Option<u64>,
    format_note: Option<String>,
    vcodec: Option<String>,
    acodec: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YtDlpThumbnail {
    url: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Resolve metadata for a video URL.
pub async fn video_info(url: &str) -> FetchResult<VideoInfo> {
    which::which("yt-dlp").map_err(|_| FetchError::YtDlpNotFound)?;

    info!(url = %url, "Resolving video metadata");

    let output = Command::new("yt-dlp")
        .args(["-J", "--no-playlist", "--quiet", url])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp -J stderr: {}", stderr);
        return Err(FetchError::resolve_failed(
            stderr.lines().last().unwrap_or("Unknown error").to_string(),
        ));
    }

    let dump: YtDlpDump = serde_json::from_slice(&output.stdout)?;
    Ok(summarize(dump))
}

fn summarize(dump: YtDlpDump) -> VideoInfo {
    VideoInfo {
        title: dump.title.unwrap_or_else(|| "Untitled".to_string()),
        thumbnail: best_thumbnail(&dump.thumbnails),
        duration: dump.duration.unwrap_or(0.0),
        formats: select_formats(&dump.formats),
    }
}

/// Pick the format variants worth offering.
///
/// Variants with both a video and an audio codec come first; when none
/// qualify, every URL-bearing variant is offered so video-only sources
/// still yield a non-empty list.
fn select_formats(formats: &[YtDlpFormat]) -> Vec<FormatVariant> {
    let combined: Vec<FormatVariant> = formats
        .iter()
        .filter(|f| f.url.is_some() && has_codec(&f.vcodec) && has_codec(&f.acodec))
        .map(to_variant)
        .collect();

    if !combined.is_empty() {
        return combined;
    }

    formats
        .iter()
        .filter(|f| f.url.is_some())
        .map(to_variant)
        .collect()
}

fn to_variant(f: &YtDlpFormat) -> FormatVariant {
    FormatVariant {
        format_id: f.format_id.clone(),
        ext: f.ext.clone().unwrap_or_else(|| "mp4".to_string()),
        resolution: f.resolution.clone().unwrap_or_else(|| "unknown".to_string()),
        filesize: f.filesize,
        note: f.format_note.clone().unwrap_or_default(),
        vcodec: f.vcodec.clone(),
        acodec: f.acodec.clone(),
        has_audio: has_codec(&f.acodec),
    }
}

fn has_codec(codec: &Option<String>) -> bool {
    codec.as_deref().is_some_and(|c| c != "none")
}

/// Thumbnail with the greatest pixel area, empty string when there are none.
fn best_thumbnail(thumbnails: &[YtDlpThumbnail]) -> String {
    thumbnails
        .iter()
        .max_by_key(|t| {
            u64::from(t.width.unwrap_or(0)) * u64::from(t.height.unwrap_or(0))
        })
        .and_then(|t| t.url.clone())
        .unwrap_or_default()
}
