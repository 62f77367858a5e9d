//! `anidl` command-line adapter.
//!
//! - `parser` - clap argument definitions
//! - `handlers` - the download flow
//! - `presentation` - progress bars and console output
//! - `utils` - interactive prompts and input validation

#![deny(unsafe_code)]

pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod utils;

pub use error::CliError;
pub use parser::Cli;
