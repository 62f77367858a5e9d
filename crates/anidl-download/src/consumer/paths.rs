//! Destination path planning for episode files.

use std::path::{Path, PathBuf};

use anidl_core::{DownloadError, EpisodeRange, episode_filename};

/// Where the episodes of one title are written.
#[derive(Debug, Clone)]
pub struct DownloadDestination {
    /// Directory all episode files go into.
    pub output_dir: PathBuf,
    /// Title used as the filename prefix.
    pub title: String,
}

impl DownloadDestination {
    pub fn new(output_dir: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            title: title.into(),
        }
    }

    /// Create the output directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), DownloadError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| DownloadError::io("create_dir", e.to_string()))
    }

    /// Filename for `episode`; the series' last episode carries the end marker.
    pub fn file_name(&self, episode: u32, range: &EpisodeRange) -> String {
        episode_filename(&self.title, episode, range.is_final(episode))
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
