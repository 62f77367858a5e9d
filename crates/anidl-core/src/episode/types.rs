//! Core domain types for episode downloads.
//!
//! Pure data types with no I/O dependencies.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{QualityParseError, RangeError};

/// A discrete quality rendition of an episode.
///
/// Variants are declared highest to lowest, so the derived `Ord` sorts
/// better renditions first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    /// 1080p rendition.
    Fhd1080,
    /// 720p rendition.
    Hd720,
    /// 480p rendition.
    Sd480,
}

impl QualityTier {
    /// All tiers, highest first.
    pub const ALL: [Self; 3] = [Self::Fhd1080, Self::Hd720, Self::Sd480];

    /// Vertical resolution as shown to users ("1080", "720", "480").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fhd1080 => "1080",
            Self::Hd720 => "720",
            Self::Sd480 => "480",
        }
    }

    /// Position in the ordering, 0 being the highest tier.
    #[must_use]
    pub const fn rank(self) -> usize {
        match self {
            Self::Fhd1080 => 0,
            Self::Hd720 => 1,
            Self::Sd480 => 2,
        }
    }

    /// This tier followed by every lower tier, in descending order.
    pub fn at_or_below(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().skip(self.rank())
    }

    /// Classify a download option label by substring match.
    ///
    /// The label is trimmed and lowercased first. "1080" is checked before
    /// "720", which is checked before "480".
    pub fn classify_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|tier| normalized.contains(tier.as_str()))
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.as_str())
    }
}

impl FromStr for QualityTier {
    type Err = QualityParseError;

    /// Accepts "1080", "720p", " 480P " and similar. A trailing `p` unit is
    /// stripped; nothing else is coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let numeric = lowered.strip_suffix('p').unwrap_or(&lowered);
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == numeric)
            .ok_or_else(|| QualityParseError {
                value: s.trim().to_string(),
            })
    }
}

/// Download URLs discovered for one episode, keyed by tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityCandidates {
    links: BTreeMap<QualityTier, String>,
}

impl QualityCandidates {
    /// Create an empty candidate set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            links: BTreeMap::new(),
        }
    }

    /// Record a link for a tier, replacing any earlier link for that tier.
    pub fn insert(&mut self, tier: QualityTier, url: impl Into<String>) {
        self.links.insert(tier, url.into());
    }

    /// The link for a tier, if discovered.
    pub fn get(&self, tier: QualityTier) -> Option<&str> {
        self.links.get(&tier).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }
}

impl<S: Into<String>> FromIterator<(QualityTier, S)> for QualityCandidates {
    fn from_iter<I: IntoIterator<Item = (QualityTier, S)>>(iter: I) -> Self {
        let mut candidates = Self::new();
        for (tier, url) in iter {
            candidates.insert(tier, url);
        }
        candidates
    }
}

/// Inclusive range of episodes requested for one run.
///
/// Invariant: `1 <= start <= end <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRange {
    start: u32,
    end: u32,
    total: u32,
}

impl EpisodeRange {
    /// Create a validated range.
    pub const fn new(start: u32, end: u32, total: u32) -> Result<Self, RangeError> {
        if start < 1 || start > total {
            return Err(RangeError::StartOutOfBounds { start, total });
        }
        if end < start || end > total {
            return Err(RangeError::EndOutOfBounds { start, end, total });
        }
        Ok(Self { start, end, total })
    }

    pub const fn start(&self) -> u32 {
        self.start
    }

    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Total episode count of the whole series, not of the range.
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Number of episodes in the range.
    pub const fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Always false; a valid range holds at least one episode.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether `episode` is the last episode of the series.
    pub const fn is_final(&self, episode: u32) -> bool {
        episode == self.total
    }

    pub const fn episodes(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl fmt::Display for EpisodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} of {}", self.start, self.end, self.total)
    }
}

/// A chosen download link, tagged with the episode it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedItem {
    /// Episode number (1-based).
    pub episode: u32,
    /// Direct media URL.
    pub url: String,
    /// Tier the URL was discovered under.
    pub tier: QualityTier,
}

impl ResolvedItem {
    pub fn new(episode: u32, url: impl Into<String>, tier: QualityTier) -> Self {
        Self {
            episode,
            url: url.into(),
            tier,
        }
    }
}
