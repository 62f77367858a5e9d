//! Web adapters for anidl.
//!
//! Implements the core fetch, transport and parse ports:
//!
//! - [`ReqwestClient`] - `PageFetcher` and `MediaTransport` over reqwest
//! - [`ScraperPageParser`] - `PageParser` over scraper
//! - [`WebClientConfig`] - user agent, timeouts and retries

#![deny(unsafe_code)]

mod config;
mod error;
mod http;
mod parsing;

// ============================================================================
// Public API
// ============================================================================

pub use config::{DEFAULT_USER_AGENT, WebClientConfig};
pub use error::{WebError, WebResult};
pub use http::ReqwestClient;
pub use parsing::ScraperPageParser;
