//! End-of-run console output.

use anidl_download::RunSummary;

pub const BANNER: &str = r"
   ___          _     ____
  / _ | ___    (_)___/ / /
 / __ |/ _ \  / / __  / /
/_/ |_/_//_/ /_/\_,_/_/
";

pub fn print_banner() {
    println!("{BANNER}");
    println!("Welcome to anidl");
}

/// Print one line per episode followed by the totals.
pub fn print_summary(summary: &RunSummary) {
    if summary.is_empty() {
        println!("Nothing was downloaded.");
        return;
    }

    println!();
    println!("Summary:");
    for (episode, outcome) in summary.iter() {
        println!("  Episode {episode:>4}: {outcome}");
    }
    println!(
        "{} downloaded, {} skipped, {} failed",
        summary.downloaded(),
        summary.skipped(),
        summary.failed()
    );
    if summary.is_cancelled() {
        println!("The run was cancelled before every episode was processed.");
    }
}

pub fn print_farewell() {
    println!("Thanks for using anidl :)");
}
