//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the pipeline expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `scraper` types in any signature
//! - Parsers are synchronous; fetchers and transports are async
//! - Every port is `Send + Sync` so producer and consumer tasks can share it

pub mod fetch;
pub mod parse;
pub mod progress;

pub use fetch::{MediaStream, MediaTransport, PageFetcher};
pub use parse::{PageParser, QualityOption};
pub use progress::{DownloadProgress, NoopProgress, ProgressSink};
