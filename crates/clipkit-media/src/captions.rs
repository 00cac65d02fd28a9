//! Subtitle burn-in.
//!
//! Overlays a SubRip file onto the video track with the `subtitles` filter.
//! Video is re-encoded (the overlay forces it); audio is stream-copied so
//! sources that had an audio track keep it bit-for-bit.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::tools::ToolPaths;

/// Fixed quality for the forced re-encode.
const CAPTION_CRF: u8 = 23;

/// Burn subtitles from `subtitles_path` onto `input`, writing `output`.
///
/// The subtitle file's contents are taken verbatim; malformed SubRip is the
/// transcoder's problem and surfaces through its stderr.
pub async fn burn_captions(
    tools: &ToolPaths,
    input: impl AsRef<Path>,
    subtitles_path: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let input = input.as_ref();
    let subtitles_path = subtitles_path.as_ref();
    let output = output.as_ref();

    info!(
        subtitles = %subtitles_path.display(),
        "Burning captions: {} -> {}",
        input.display(),
        output.display()
    );

    let filter = format!("subtitles={}", escape_filter_path(subtitles_path));

    let cmd = FfmpegCommand::new(input, output)
        .video_filter(filter)
        .video_codec("libx264")
        .preset("fast")
        .crf(CAPTION_CRF)
        .audio_codec("copy");

    FfmpegRunner::new(tools).run(&cmd).await
}

/// Escape a path for use inside an ffmpeg filter argument.
///
/// Filter syntax treats `:` as an option separator and `'` as a quote, and
/// backslashes are their own escape character, so Windows paths get their
/// separators normalized to `/` first.
fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}
