//! Episode domain types, outcomes, and errors.
//!
//! This module contains pure data types for the download pipeline.
//! No I/O, networking, or runtime dependencies allowed.
//!
//! # Structure
//!
//! - `types` - Ranges, quality tiers, candidate sets, resolved items
//! - `outcome` - Per-episode outcomes and skip reasons
//! - `errors` - Error types for fetch, download and input validation

pub mod errors;
pub mod outcome;
pub mod types;

pub use errors::{DownloadError, QualityParseError, RangeError};
pub use outcome::{EpisodeOutcome, SkipReason};
pub use types::{EpisodeRange, QualityCandidates, QualityTier, ResolvedItem};
