//! Terminal rendering of download progress.
//!
//! Uses an indicatif bar when stdout is a terminal and plain carriage-return
//! lines otherwise. The consumer already rate-limits updates, so every call
//! is drawn.

use std::io::{self, IsTerminal, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anidl_core::{DownloadProgress, EpisodeOutcome, ProgressSink};
use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress sink for the `anidl` binary.
pub struct CliProgress {
    render: Render,
    state: Mutex<State>,
}

enum Render {
    Fancy,
    Plain,
}

#[derive(Default)]
struct State {
    bar: Option<ProgressBar>,
    position: u32,
    expected: u32,
    last_line_len: usize,
}

impl CliProgress {
    /// Pick fancy or plain output depending on whether stdout is a terminal.
    pub fn new() -> Self {
        let render = if io::stdout().is_terminal() {
            Render::Fancy
        } else {
            Render::Plain
        };
        Self {
            render,
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{msg} {bar:30.cyan/blue} {bytes:>9} / {total_bytes:>9} ({percent:>3}%) @ {binary_bytes_per_sec}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} {bytes} @ {binary_bytes_per_sec}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for CliProgress {
    fn episode_started(&self, episode: u32, position: u32, expected: u32, filename: &str) {
        let mut state = self.state();
        state.position = position;
        state.expected = expected;
        state.last_line_len = 0;

        println!("Starting download for episode {position}/{expected}: {filename}");

        if matches!(self.render, Render::Fancy) {
            let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
            bar.set_style(Self::spinner_style());
            bar.set_message(format!("Episode {episode}"));
            bar.enable_steady_tick(Duration::from_millis(120));
            state.bar = Some(bar);
        }
    }

    fn progress(&self, _episode: u32, progress: DownloadProgress) {
        let mut state = self.state();
        match self.render {
            Render::Fancy => {
                if let Some(bar) = &state.bar {
                    if let Some(total) = progress.total.filter(|t| *t > 0) {
                        if bar.length() != Some(total) {
                            bar.set_style(Self::bar_style());
                            bar.set_length(total);
                        }
                    }
                    bar.set_position(progress.written);
                }
            }
            Render::Plain => {
                let line = progress.percent().map_or_else(
                    || format!("Downloading... {}", HumanBytes(progress.written)),
                    |percent| format!("Downloading... {percent:.2}%"),
                );
                let pad = state.last_line_len.saturating_sub(line.len());
                print!("\r{line}{}", " ".repeat(pad));
                io::stdout().flush().ok();
                state.last_line_len = line.len();
            }
        }
    }

    fn episode_finished(&self, episode: u32, outcome: &EpisodeOutcome) {
        let mut state = self.state();
        if let Some(bar) = state.bar.take() {
            bar.finish_and_clear();
        }
        if state.last_line_len > 0 {
            println!();
            state.last_line_len = 0;
        }

        match outcome {
            EpisodeOutcome::Downloaded { .. } => {
                println!(
                    "Episode {}/{} downloaded successfully!",
                    state.position, state.expected
                );
            }
            EpisodeOutcome::Failed(reason) => {
                println!("Failed to download episode {episode}: {reason}");
            }
            EpisodeOutcome::Skipped(reason) => {
                println!("Skipped episode {episode}: {reason}");
            }
            EpisodeOutcome::Cancelled => {
                println!("Download of episode {episode} was cancelled");
            }
        }
    }
}
