//! Download pipeline configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Configuration for the download consumer.
///
/// # Example
///
/// ```
/// use anidl_download::DownloadConfig;
/// use std::time::Duration;
///
/// let config = DownloadConfig::new()
///     .with_output_dir("/tmp/anime")
///     .with_chunk_timeout(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Directory episode files are written to
    pub(crate) output_dir: PathBuf,
    /// Longest wait for the next body chunk before the item fails
    pub(crate) chunk_timeout: Duration,
    /// Minimum spacing between forwarded progress updates
    pub(crate) progress_interval: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            chunk_timeout: Duration::from_secs(60),
            progress_interval: Duration::from_millis(100),
        }
    }
}

impl DownloadConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the stall timeout, applied to waiting for the media response
    /// headers and to every chunk read.
    ///
    /// Defaults to 60 seconds.
    #[must_use]
    pub const fn with_chunk_timeout(mut self, timeout: Duration) -> Self {
        self.chunk_timeout = timeout;
        self
    }

    /// Defaults to 100ms.
    #[must_use]
    pub const fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub const fn chunk_timeout(&self) -> Duration {
        self.chunk_timeout
    }

    pub const fn progress_interval(&self) -> Duration {
        self.progress_interval
    }
}
