//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Download a range of episodes of one title.
///
/// Anything not given on the command line is asked for interactively.
#[derive(Parser, Debug)]
#[command(name = "anidl")]
#[command(about = "Download anime episodes in order, at your preferred quality")]
#[command(version)]
pub struct Cli {
    /// Title page URL (e.g. <https://anime3rb.com/titles/naruto>)
    pub url: Option<String>,

    /// First episode to download
    #[arg(short = 's', long)]
    pub start: Option<u32>,

    /// Last episode to download
    #[arg(short = 'e', long)]
    pub end: Option<u32>,

    /// Preferred quality: 1080, 720 or 480 (a trailing "p" is accepted)
    #[arg(short = 'q', long)]
    pub quality: Option<String>,

    /// Directory episode files are written to
    #[arg(short = 'o', long, env = "ANIDL_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// User agent sent with every request
    #[arg(long, env = "ANIDL_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Page request timeout in seconds
    #[arg(long = "timeout", env = "ANIDL_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Retries for failed page requests
    #[arg(long, default_value_t = 0)]
    pub retries: u8,

    /// Seconds to wait for the next chunk of a download before giving up on it
    #[arg(long = "stall-timeout", default_value_t = 60)]
    pub stall_timeout_secs: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
