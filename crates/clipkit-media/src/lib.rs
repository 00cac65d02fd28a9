//! FFmpeg CLI wrapper.
//!
//! This crate shells out to `ffmpeg` and `ffprobe` for the editing
//! operations the API exposes:
//!
//! - [`trim_video`]: extract a time range with stream copy (no re-encode)
//! - [`burn_captions`]: overlay SubRip subtitles onto the video track
//! - [`probe_video`]: read duration and stream layout via ffprobe
//!
//! Binary locations are resolved once at startup into [`ToolPaths`] and
//! passed explicitly to every operation; nothing in this crate consults
//! global state.

pub mod captions;
pub mod command;
pub mod error;
pub mod probe;
pub mod tools;
pub mod trim;
pub mod workspace;

pub use captions::burn_captions;
pub use command::{FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use probe::{get_duration, probe_video, VideoInfo};
pub use tools::ToolPaths;
pub use trim::{trim_video, TrimRange};
pub use workspace::Workspace;
