//! Stream download.
//!
//! Downloads a selected format into a caller-supplied directory. Video
//! downloads merge with the best available audio track into an MP4; audio
//! downloads extract to MP3. The produced file is located by scanning the
//! directory, since yt-dlp names output after the video title.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::OnceLock;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{FetchError, FetchResult};

/// Title length cap for the attachment filename.
const MAX_TITLE_LEN: usize = 50;

/// Parameters for one download.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub format_id: String,
    pub audio_only: bool,
    /// Resolved ffmpeg binary, forwarded so yt-dlp's merge/extract
    /// postprocessing uses the same transcoder the rest of the service does.
    pub ffmpeg_location: Option<PathBuf>,
}

/// A completed download.
#[derive(Debug)]
pub struct Download {
    /// Path of the produced file inside the destination directory.
    pub path: PathBuf,
    /// Sanitized attachment filename.
    pub filename: String,
    /// MIME type of the produced file.
    pub content_type: &'static str,
}

/// Download the requested stream into `dest_dir`.
pub async fn download(request: &DownloadRequest, dest_dir: &Path) -> FetchResult<Download> {
    which::which("yt-dlp").map_err(|_| FetchError::YtDlpNotFound)?;

    let template = dest_dir.join("%(title)s.%(ext)s");
    let mut args: Vec<String> = vec![
        "--no-playlist".to_string(),
        "--socket-timeout".to_string(),
        "30".to_string(),
        "-o".to_string(),
        template.to_string_lossy().to_string(),
    ];

    if request.audio_only {
        args.extend([
            "-f".to_string(),
            "bestaudio/best".to_string(),
            "-x".to_string(),
            "--audio-format".to_string(),
            "mp3".to_string(),
            "--audio-quality".to_string(),
            "192K".to_string(),
        ]);
    } else {
        // Video-only formats get the best audio track merged in
        args.extend([
            "-f".to_string(),
            format!("{}+bestaudio", request.format_id),
            "--merge-output-format".to_string(),
            "mp4".to_string(),
        ]);
    }

    if let Some(ffmpeg) = &request.ffmpeg_location {
        args.push("--ffmpeg-location".to_string());
        args.push(ffmpeg.to_string_lossy().to_string());
    }

    args.push(request.url.clone());

    info!(
        url = %request.url,
        format_id = %request.format_id,
        audio_only = request.audio_only,
        "Downloading stream"
    );

    let output = Command::new("yt-dlp")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp stderr: {}", stderr);

        if stderr.contains("Requested format is not available") {
            return Err(FetchError::FormatUnavailable);
        }
        return Err(FetchError::download_failed(
            stderr.lines().last().unwrap_or("Unknown error").to_string(),
        ));
    }

    let path = find_output_file(dest_dir).await?;

    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "video".to_string());

    let (ext, content_type) = if request.audio_only {
        ("mp3", "audio/mpeg")
    } else {
        ("mp4", "video/mp4")
    };

    let filename = format!("{}.{}", sanitize_title(&title), ext);

    let size = path.metadata()?.len();
    info!(
        output = %path.display(),
        size_mb = size as f64 / (1024.0 * 1024.0),
        "Downloaded stream successfully"
    );

    Ok(Download {
        path,
        filename,
        content_type,
    })
}

/// Locate the produced file: the largest regular file in the directory.
///
/// Postprocessing can leave fragment leftovers next to the merged result;
/// the final container is always the biggest file.
async fn find_output_file(dir: &Path) -> FetchResult<PathBuf> {
    let mut best: Option<(u64, PathBuf)> = None;

    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let meta = entry.metadata().await?;
        if !meta.is_file() {
            continue;
        }
        let len = meta.len();
        if best.as_ref().map_or(true, |(size, _)| len > *size) {
            best = Some((len, entry.path()));
        }
    }

    best.map(|(_, path)| path).ok_or(FetchError::OutputMissing)
}

/// Strip characters unsafe for an attachment filename and cap the length.
pub fn sanitize_title(title: &str) -> String {
    static PATTERN: OnceLock<regex_lite::Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| regex_lite::Regex::new(r"[^\w\-_. ]").unwrap());

    pattern
        .replace_all(title, "")
        .chars()
        .take(MAX_TITLE_LEN)
        .collect()
}
