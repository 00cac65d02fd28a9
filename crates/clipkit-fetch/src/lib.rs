//! yt-dlp CLI wrapper.
//!
//! Resolves video URLs into stream metadata ([`video_info`]) and downloads
//! a selected variant ([`download`]). Both operations shell out to the
//! `yt-dlp` binary and surface its diagnostics through [`FetchError`].

pub mod download;
pub mod error;
pub mod info;

pub use download::{download, sanitize_title, Download, DownloadRequest};
pub use error::{FetchError, FetchResult};
pub use info::{video_info, FormatVariant, VideoInfo};
