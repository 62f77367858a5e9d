//! The download flow: discover the title, collect the range and quality,
//! then run the pipeline.

use std::sync::Arc;
use std::time::Duration;

use anidl_core::{DownloadError, EpisodeRange, QualityTier, RangeError, TitleUrl};
use anidl_download::{
    DownloadConfig, DownloadRequest, PipelineDeps, RunSummary, discover_title, run_pipeline,
};
use anidl_web::{ReqwestClient, ScraperPageParser, WebClientConfig};
use tokio_util::sync::CancellationToken;

use crate::error::CliError;
use crate::parser::Cli;
use crate::presentation::CliProgress;
use crate::utils::input::{parse_quality, prompt_episode, prompt_quality, prompt_title_url};

/// Build the web client configuration from command-line options.
pub fn web_config(cli: &Cli) -> WebClientConfig {
    let config = WebClientConfig::new()
        .with_request_timeout(Duration::from_secs(cli.timeout_secs))
        .with_max_retries(cli.retries);
    match &cli.user_agent {
        Some(user_agent) => config.with_user_agent(user_agent),
        None => config,
    }
}

pub fn download_config(cli: &Cli) -> DownloadConfig {
    DownloadConfig::new()
        .with_output_dir(&cli.output_dir)
        .with_chunk_timeout(Duration::from_secs(cli.stall_timeout_secs))
}

/// Run one download session.
///
/// Missing options are prompted for; invalid flag values are argument
/// errors. Ctrl-C is only intercepted once downloading starts, so it still
/// ends the process while a prompt is waiting.
pub async fn execute(cli: &Cli) -> Result<RunSummary, CliError> {
    let title = match &cli.url {
        Some(raw) => TitleUrl::parse(raw)?,
        None => prompt_title_url()?,
    };

    let client = Arc::new(ReqwestClient::new(&web_config(cli))?);
    let parser = Arc::new(ScraperPageParser::new().map_err(DownloadError::from)?);

    let info = discover_title(client.as_ref(), parser.as_ref(), &title).await?;
    println!("{} has {} episodes.", info.name, info.total_episodes);

    let range = collect_range(cli, info.total_episodes)?;
    let preferred = collect_quality(cli)?;

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let deps = PipelineDeps {
        fetcher: client.clone(),
        parser,
        transport: client,
        progress: Arc::new(CliProgress::new()),
    };
    let request = DownloadRequest {
        title: info,
        range,
        preferred,
    };

    Ok(run_pipeline(&deps, request, &download_config(cli), cancel).await?)
}

/// Range from flags where given, prompts otherwise.
fn collect_range(cli: &Cli, total: u32) -> Result<EpisodeRange, CliError> {
    let start = match cli.start {
        Some(start) if (1..=total).contains(&start) => start,
        Some(start) => return Err(RangeError::StartOutOfBounds { start, total }.into()),
        None => prompt_episode("Enter the episode number to start from", 1, total)?,
    };
    let end = match cli.end {
        Some(end) => end,
        None => prompt_episode("Enter the episode number to end at", start, total)?,
    };
    Ok(EpisodeRange::new(start, end, total)?)
}

fn collect_quality(cli: &Cli) -> Result<QualityTier, CliError> {
    match &cli.quality {
        Some(text) => parse_quality(text).map_err(CliError::Arguments),
        None => Ok(prompt_quality()?),
    }
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping downloads");
            cancel.cancel();
        }
    });
}
