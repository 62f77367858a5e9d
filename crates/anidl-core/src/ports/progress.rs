//! Progress reporting port.
//!
//! The consumer reports through this trait so CLI and tests can observe a
//! run without coupling to a terminal.

use crate::episode::EpisodeOutcome;

/// Byte progress of a single download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Bytes written to disk so far.
    pub written: u64,
    /// Declared content length, if the server sent one.
    pub total: Option<u64>,
}

impl DownloadProgress {
    pub const fn new(written: u64, total: Option<u64>) -> Self {
        Self { written, total }
    }

    /// Percentage of the declared length written, capped at 100.
    ///
    /// `None` when the length is unknown or zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => {
                Some((self.written as f64 / total as f64 * 100.0).min(100.0))
            }
            _ => None,
        }
    }

    /// Whether every declared byte has been written.
    pub const fn is_complete(&self) -> bool {
        match self.total {
            Some(total) => self.written >= total,
            None => false,
        }
    }
}

/// Receives per-episode progress from the consumer.
pub trait ProgressSink: Send + Sync {
    /// A download is starting. `position` counts deliveries from 1 and
    /// `expected` is the size of the requested range.
    fn episode_started(&self, episode: u32, position: u32, expected: u32, filename: &str);

    /// More bytes were written.
    fn progress(&self, episode: u32, progress: DownloadProgress);

    /// The download ended, successfully or not.
    fn episode_finished(&self, episode: u32, outcome: &EpisodeOutcome);
}

/// A progress sink that ignores all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn episode_started(&self, _episode: u32, _position: u32, _expected: u32, _filename: &str) {}
    fn progress(&self, _episode: u32, _progress: DownloadProgress) {}
    fn episode_finished(&self, _episode: u32, _outcome: &EpisodeOutcome) {}
}
