//! Per-request temporary workspaces.
//!
//! Every editing request gets a uniquely named temp directory that holds
//! the uploaded input and all intermediates. The directory is removed when
//! the [`Workspace`] drops, which covers success, validation failures, and
//! transcoder errors alike.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

use crate::error::MediaResult;

/// A request-scoped scratch directory with fixed member names.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace.
    pub fn create() -> MediaResult<Self> {
        let dir = tempfile::Builder::new().prefix("clipkit-").tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where the uploaded source video lands.
    pub fn input_path(&self) -> PathBuf {
        self.dir.path().join("input.mp4")
    }

    /// Intermediate output of the trim step in the combined pipeline.
    pub fn trimmed_path(&self) -> PathBuf {
        self.dir.path().join("trimmed.mp4")
    }

    /// Where subtitle text is written.
    pub fn captions_path(&self) -> PathBuf {
        self.dir.path().join("captions.srt")
    }

    /// Final transcoder output.
    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("output.mp4")
    }

    /// Persist the uploaded video bytes.
    pub async fn write_input(&self, data: &[u8]) -> MediaResult<PathBuf> {
        let path = self.input_path();
        fs::write(&path, data).await?;
        Ok(path)
    }

    /// Write subtitle text verbatim.
    pub async fn write_captions(&self, text: &str) -> MediaResult<PathBuf> {
        let path = self.captions_path();
        fs::write(&path, text).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_workspace_removed_on_drop() {
        let ws = Workspace::create().unwrap();
        let path = ws.path().to_path_buf();
        ws.write_input(b"not a real video").await.unwrap();
        assert!(path.exists());

        drop(ws);
        assert!(!path.exists(), "workspace should be removed on drop");
    }

    #[tokio::test]
    async fn test_captions_written_verbatim() {
        let ws = Workspace::create().unwrap();
        let text = "1\n00:00:00,000 --> 00:00:02,000\nhello\n";
        let path = ws.write_captions(text).await.unwrap();
        assert_eq!(fs::read_to_string(&path).await.unwrap(), text);
    }

    #[test]
    fn test_member_paths_live_inside_workspace() {
        let ws = Workspace::create().unwrap();
        assert!(ws.input_path().starts_with(ws.path()));
        assert!(ws.trimmed_path().starts_with(ws.path()));
        assert!(ws.captions_path().starts_with(ws.path()));
        assert!(ws.output_path().starts_with(ws.path()));
    }
}
