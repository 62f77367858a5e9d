//! CLI entry point - the composition root.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use anidl_cli::presentation::{print_banner, print_farewell, print_summary};
use anidl_cli::{Cli, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Diagnostics go to stderr so they do not break progress lines on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    print_banner();

    let code = match handlers::download::execute(&cli).await {
        Ok(summary) => {
            print_summary(&summary);
            print_farewell();
            if summary.is_cancelled() { 130 } else { 0 }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code()
        }
    };

    std::process::exit(code);
}
