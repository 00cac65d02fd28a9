//! External tool discovery.
//!
//! Resolves the ffmpeg and ffprobe binaries once at process startup into an
//! immutable [`ToolPaths`] that gets passed to every component that shells
//! out. A fixed list of OS-specific install locations is checked first,
//! then `PATH`, then the bare command name as a last resort.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn};

use crate::error::{MediaError, MediaResult};

/// Timeout for the diagnostic `-version` invocation.
const VERSION_CHECK_TIMEOUT_SECS: u64 = 5;

#[cfg(not(windows))]
const FFMPEG_CANDIDATES: &[&str] = &[
    "/usr/bin/ffmpeg",
    "/usr/local/bin/ffmpeg",
    "/opt/homebrew/bin/ffmpeg",
];

#[cfg(not(windows))]
const FFPROBE_CANDIDATES: &[&str] = &[
    "/usr/bin/ffprobe",
    "/usr/local/bin/ffprobe",
    "/opt/homebrew/bin/ffprobe",
];

#[cfg(windows)]
const FFMPEG_CANDIDATES: &[&str] = &[
    "C:\\ffmpeg\\bin\\ffmpeg.exe",
    "C:\\Program Files\\ffmpeg\\bin\\ffmpeg.exe",
    "C:\\Program Files (x86)\\ffmpeg\\bin\\ffmpeg.exe",
];

#[cfg(windows)]
const FFPROBE_CANDIDATES: &[&str] = &[
    "C:\\ffmpeg\\bin\\ffprobe.exe",
    "C:\\Program Files\\ffmpeg\\bin\\ffprobe.exe",
    "C:\\Program Files (x86)\\ffmpeg\\bin\\ffprobe.exe",
];

/// Resolved locations of the external transcoding binaries.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl ToolPaths {
    /// Discover ffmpeg and ffprobe.
    ///
    /// Discovery never fails: when neither a known install location nor
    /// `PATH` yields a hit, the bare command name is kept and the first
    /// actual invocation will surface the missing binary.
    pub fn discover() -> Self {
        let ffmpeg = find_tool("ffmpeg", FFMPEG_CANDIDATES);
        let ffprobe = find_tool("ffprobe", FFPROBE_CANDIDATES);
        info!(
            ffmpeg = %ffmpeg.display(),
            ffprobe = %ffprobe.display(),
            "Resolved transcoder binaries"
        );
        Self { ffmpeg, ffprobe }
    }

    /// Run `ffmpeg -version` and return the first line of its output.
    ///
    /// Used by the diagnostic endpoint. The invocation runs under a short
    /// timeout so a wedged binary cannot hang the request.
    pub async fn version(&self) -> MediaResult<String> {
        let output = tokio::time::timeout(
            Duration::from_secs(VERSION_CHECK_TIMEOUT_SECS),
            Command::new(&self.ffmpeg)
                .arg("-version")
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output(),
        )
        .await
        .map_err(|_| MediaError::Timeout(VERSION_CHECK_TIMEOUT_SECS))?
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MediaError::FfmpegNotFound
            } else {
                MediaError::Io(e)
            }
        })?;

        if !output.status.success() {
            return Err(MediaError::ffmpeg_failed(
                format!(
                    "ffmpeg -version exited with code {}",
                    output.status.code().unwrap_or(-1)
                ),
                Some(String::from_utf8_lossy(&output.stderr).to_string()),
                output.status.code(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().to_string())
    }
}

/// Find a tool: known install locations first, then `PATH`, then bare name.
fn find_tool(name: &str, candidates: &[&str]) -> PathBuf {
    for candidate in candidates {
        let path = Path::new(candidate);
        if path.exists() {
            return path.to_path_buf();
        }
    }

    match which::which(name) {
        Ok(path) => path,
        Err(_) => {
            warn!("{} not found in known locations, relying on command search path", name);
            PathBuf::from(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tool_falls_back_to_bare_name() {
        let path = find_tool("definitely-not-a-real-binary", &["/nonexistent/path"]);
        assert_eq!(path, PathBuf::from("definitely-not-a-real-binary"));
    }

    #[tokio::test]
    async fn test_version_missing_binary() {
        let tools = ToolPaths {
            ffmpeg: PathBuf::from("/nonexistent/ffmpeg"),
            ffprobe: PathBuf::from("/nonexistent/ffprobe"),
        };
        let err = tools.version().await.unwrap_err();
        assert!(matches!(
            err,
            MediaError::FfmpegNotFound | MediaError::Io(_)
        ));
    }
}
