//! Error types for fetcher operations.

use thiserror::Error;

/// Result type for fetcher operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors that can occur while resolving or downloading streams.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("This format is unavailable. Try another format.")]
    FormatUnavailable,

    #[error("Failed to resolve URL: {message}")]
    ResolveFailed { message: String },

    #[error("Download failed: {message}")]
    DownloadFailed { message: String },

    #[error("Fetcher produced no output file")]
    OutputMissing,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl FetchError {
    /// Create a resolve failure error.
    pub fn resolve_failed(message: impl Into<String>) -> Self {
        Self::ResolveFailed {
            message: message.into(),
        }
    }

    /// Create a download failure error.
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }
}
