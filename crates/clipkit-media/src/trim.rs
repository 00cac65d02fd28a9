//! Stream-copy trimming.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::probe::get_duration;
use crate::tools::ToolPaths;

/// A requested trim range in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimRange {
    pub start: f64,
    pub end: f64,
}

impl TrimRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// A range is usable when start is non-negative and strictly before end.
    pub fn is_valid(&self) -> bool {
        self.start >= 0.0 && self.start < self.end
    }

    /// Clamp the end to the source duration.
    ///
    /// Requests routinely overshoot the source length; the effective clip
    /// then runs to the end of the file.
    pub fn clamped_to(&self, source_duration: f64) -> Self {
        Self {
            start: self.start,
            end: self.end.min(source_duration),
        }
    }

    /// Effective clip duration.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Trim `[start, end)` out of `input` into `output` using stream copy.
///
/// The source is probed first and the end position clamped to its duration.
/// Stream copy means no re-encode, so cuts land on keyframes but the
/// operation is near-instant.
pub async fn trim_video(
    tools: &ToolPaths,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    range: TrimRange,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let source_duration = get_duration(tools, input).await?;
    let range = range.clamped_to(source_duration);

    info!(
        start = range.start,
        end = range.end,
        source_duration,
        "Trimming {} -> {}",
        input.display(),
        output.display()
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(range.start)
        .duration(range.duration())
        .codec_copy();

    FfmpegRunner::new(tools).run(&cmd).await
}
