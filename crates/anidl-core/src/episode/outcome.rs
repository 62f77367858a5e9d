//! Per-episode outcomes reported at the end of a run.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::types::QualityTier;

/// Why an episode produced no download link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The episode page has no download-options container.
    NoDownloadSection,
    /// The container holds no recognizable quality links.
    NoLinksFound,
    /// Links exist, but none at or below the preferred tier.
    NoSuitableQuality { preferred: QualityTier },
    /// The episode page could not be fetched.
    PageUnavailable { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDownloadSection => write!(f, "no download section"),
            Self::NoLinksFound => write!(f, "no links found"),
            Self::NoSuitableQuality { preferred } => {
                write!(f, "no suitable quality (tried {preferred} and lower)")
            }
            Self::PageUnavailable { message } => write!(f, "page unavailable: {message}"),
        }
    }
}

/// Final state of one episode in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    /// Written to disk in full.
    Downloaded { path: PathBuf, bytes: u64 },
    /// Never enqueued.
    Skipped(SkipReason),
    /// Enqueued, but the download was abandoned.
    Failed(String),
    /// Interrupted by cancellation while downloading; a partial file may remain.
    Cancelled,
}

impl EpisodeOutcome {
    pub const fn is_downloaded(&self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }

    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for EpisodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Downloaded { path, .. } => write!(f, "downloaded to {}", path.display()),
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
            Self::Failed(reason) => write!(f, "failed ({reason})"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::NoDownloadSection.to_string(), "no download section");
        assert_eq!(SkipReason::NoLinksFound.to_string(), "no links found");
        assert_eq!(
            SkipReason::NoSuitableQuality {
                preferred: QualityTier::Hd720
            }
            .to_string(),
            "no suitable quality (tried 720p and lower)"
        );
    }

    #[test]
    fn test_outcome_predicates() {
        let skipped = EpisodeOutcome::Skipped(SkipReason::NoLinksFound);
        assert!(skipped.is_skipped());
        assert!(!skipped.is_downloaded());

        let failed = EpisodeOutcome::Failed("HTTP 404".to_string());
        assert!(failed.is_failed());
        assert_eq!(failed.to_string(), "failed (HTTP 404)");

        let cancelled = EpisodeOutcome::Cancelled;
        assert!(cancelled.is_cancelled());
        assert!(!cancelled.is_failed());
        assert_eq!(cancelled.to_string(), "cancelled");
    }
}
