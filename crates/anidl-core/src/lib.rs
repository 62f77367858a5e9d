//! Core domain types and port definitions for anidl.
//!
//! - `episode` - ranges, quality tiers, outcomes and errors
//! - `ports` - fetch, transport, parse and progress traits
//! - `title` - title URL parsing and episode URL expansion
//! - `naming` - output filename convention

pub mod episode;
pub mod naming;
pub mod ports;
pub mod title;

// Re-export commonly used types for convenience
pub use episode::{
    DownloadError, EpisodeOutcome, EpisodeRange, QualityCandidates,
    QualityParseError, QualityTier, RangeError, ResolvedItem, SkipReason,
};
pub use naming::episode_filename;
pub use ports::{
    DownloadProgress, MediaStream, MediaTransport, NoopProgress, PageFetcher, PageParser,
    ProgressSink, QualityOption,
};
pub use title::TitleUrl;
