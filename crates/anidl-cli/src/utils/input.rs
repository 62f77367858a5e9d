//! User input utilities for interactive command-line prompts.
//!
//! Every prompt re-asks until the answer is valid. The validators are plain
//! functions so flag values go through the same rules.

use std::io::{self, BufRead, Write};

use anidl_core::{QualityTier, TitleUrl};
use anyhow::{Context, Result, bail};

/// Prompts the user for a string input.
///
/// The input is read from stdin and returned with whitespace trimmed.
///
/// # Errors
///
/// Returns an error if reading from stdin fails or stdin is closed.
pub fn prompt_string(prompt: &str) -> Result<String> {
    let stdin = io::stdin();
    prompt_string_from(&mut stdin.lock(), &mut io::stdout(), prompt)
}

fn prompt_string_from(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> Result<String> {
    write!(output, "{prompt}: ").context("Failed to write prompt")?;
    output.flush().context("Failed to write prompt")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read user input")?;
    if read == 0 {
        bail!("Input closed before an answer was given");
    }

    Ok(line.trim().to_string())
}

/// Ask until `validate` accepts the answer, printing its message otherwise.
fn prompt_until<T>(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
    validate: impl Fn(&str) -> Result<T, String>,
) -> Result<T> {
    loop {
        let answer = prompt_string_from(input, output, prompt)?;
        match validate(&answer) {
            Ok(value) => return Ok(value),
            Err(message) => {
                writeln!(output, "{message}").context("Failed to write prompt")?;
            }
        }
    }
}

/// Validate an episode number in `min..=max`.
pub fn parse_episode_number(input: &str, min: u32, max: u32) -> Result<u32, String> {
    match input.trim().parse::<u32>() {
        Ok(n) if (min..=max).contains(&n) => Ok(n),
        _ => Err(format!(
            "Invalid episode number. Please enter a number between {min} and {max} (inclusive)."
        )),
    }
}

/// Validate a quality preference such as `720`, `720p` or `720P`.
pub fn parse_quality(input: &str) -> Result<QualityTier, String> {
    input
        .parse::<QualityTier>()
        .map_err(|_| "Invalid quality. Please enter 1080, 720, or 480 (e.g., 720p or 720).".to_string())
}

/// Validate a title page URL.
pub fn parse_title_url(input: &str) -> Result<TitleUrl, String> {
    TitleUrl::parse(input).map_err(|e| e.user_message())
}

/// Ask for an episode number in `min..=max`.
pub fn prompt_episode(prompt: &str, min: u32, max: u32) -> Result<u32> {
    let stdin = io::stdin();
    prompt_until(&mut stdin.lock(), &mut io::stdout(), prompt, |answer| {
        parse_episode_number(answer, min, max)
    })
}

pub fn prompt_quality() -> Result<QualityTier> {
    let stdin = io::stdin();
    prompt_until(
        &mut stdin.lock(),
        &mut io::stdout(),
        "Enter preferred quality (1080, 720, 480)",
        parse_quality,
    )
}

pub fn prompt_title_url() -> Result<TitleUrl> {
    let stdin = io::stdin();
    prompt_until(
        &mut stdin.lock(),
        &mut io::stdout(),
        "Enter the URL of the anime (e.g. https://anime3rb.com/titles/naruto)",
        parse_title_url,
    )
}
