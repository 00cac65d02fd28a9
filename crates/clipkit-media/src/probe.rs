//! FFprobe video information.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};
use crate::tools::ToolPaths;

/// Video file information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Video codec
    pub codec: String,
    /// Whether the file carries an audio stream
    pub has_audio: bool,
    /// File size in bytes
    pub size: u64,
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Probe a video file for information.
pub async fn probe_video(tools: &ToolPaths, path: impl AsRef<Path>) -> MediaResult<VideoInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    let output = Command::new(&tools.ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MediaError::FfprobeNotFound
            } else {
                MediaError::Io(e)
            }
        })?;

    if !output.status.success() {
        return Err(MediaError::FfprobeFailed {
            message: "FFprobe failed".to_string(),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;
    parse_probe(probe)
}

/// Get video duration in seconds.
pub async fn get_duration(tools: &ToolPaths, path: impl AsRef<Path>) -> MediaResult<f64> {
    let info = probe_video(tools, path).await?;
    Ok(info.duration)
}

fn parse_probe(probe: FfprobeOutput) -> MediaResult<VideoInfo> {
    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| MediaError::InvalidVideo("No video stream found".to_string()))?;

    let has_audio = probe.streams.iter().any(|s| s.codec_type == "audio");

    let duration = probe
        .format
        .duration
        .as_ref()
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    let size = probe
        .format
        .size
        .as_ref()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    Ok(VideoInfo {
        duration,
        width: video_stream.width.unwrap_or(0),
        height: video_stream.height.unwrap_or(0),
        codec: video_stream.codec_name.clone().unwrap_or_default(),
        has_audio,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> MediaResult<VideoInfo> {
        let probe: FfprobeOutput = serde_json::from_str(json).unwrap();
        parse_probe(probe)
    }

    #[test]
    fn test_parse_probe_full() {
        let info = parse(
            r#"{
                "format": {"duration": "30.5", "size": "1048576"},
                "streams": [
                    {"codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080},
                    {"codec_type": "audio", "codec_name": "aac"}
                ]
            }"#,
        )
        .unwrap();

        assert!((info.duration - 30.5).abs() < f64::EPSILON);
        assert_eq!(info.width, 1920);
        assert_eq!(info.codec, "h264");
        assert!(info.has_audio);
        assert_eq!(info.size, 1048576);
    }

    #[test]
    fn test_parse_probe_video_only() {
        let info = parse(
            r#"{
                "format": {"duration": "12.0"},
                "streams": [{"codec_type": "video", "codec_name": "vp9"}]
            }"#,
        )
        .unwrap();

        assert!(!info.has_audio);
        assert_eq!(info.width, 0);
        assert_eq!(info.size, 0);
    }

    #[test]
    fn test_parse_probe_no_video_stream() {
        let err = parse(
            r#"{"format": {}, "streams": [{"codec_type": "audio"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, MediaError::InvalidVideo(_)));
    }
}
