//! Episode link resolution and ordered downloads.
//!
//! A run is split between two tasks joined by a queue:
//!
//! - `resolver` - one episode page to zero or one download link
//! - `producer` - resolves the requested range in order and fills the queue
//! - `queue` - FIFO hand-off with async wait on empty
//! - `consumer` - downloads queued links in order, reporting progress
//! - `pipeline` - spawns the producer, runs the consumer, merges outcomes
//!
//! `discovery` reads the episode count from the title page before a run, and
//! `quality_selector` holds the tier fallback rules.

// Re-export core types for convenience
pub use anidl_core::{
    DownloadError, EpisodeOutcome, EpisodeRange, QualityCandidates, QualityTier, ResolvedItem,
    SkipReason,
};

mod config;
mod consumer;
mod discovery;
mod pipeline;
mod producer;
mod progress;
mod quality_selector;
mod queue;
mod resolver;

pub use config::{DEFAULT_OUTPUT_DIR, DownloadConfig};
pub use consumer::{DownloadDestination, OrderedDownloadConsumer};
pub use discovery::{TitleInfo, discover_title};
pub use pipeline::{DownloadRequest, PipelineDeps, RunSummary, run_pipeline};
pub use producer::{LinkResolutionProducer, ProducerReport};
pub use progress::ProgressThrottle;
pub use quality_selector::{QualitySelection, select_quality, select_quality_label};
pub use queue::DownloadQueue;
pub use resolver::{EpisodePageResolver, Resolution};
