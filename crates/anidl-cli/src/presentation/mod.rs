//! Console output for the `anidl` binary.
//!
//! Keep this module format-only: no domain transforms.

pub mod progress;
pub mod summary;

pub use progress::CliProgress;
pub use summary::{print_banner, print_farewell, print_summary};
