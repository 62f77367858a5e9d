//! Output filename convention for downloaded episodes.

/// Extension given to every downloaded episode.
pub const EPISODE_EXTENSION: &str = "mp4";

/// Marker appended to the series' final episode.
pub const FINAL_EPISODE_MARKER: &str = "[END]";

/// Build the output filename for an episode.
///
/// `"<title> - Episode <n>.mp4"`, or `"<title> - Episode <n> [END].mp4"` when
/// `is_final` is set. Path separators and characters rejected by common
/// filesystems are replaced in the title.
pub fn episode_filename(title: &str, episode: u32, is_final: bool) -> String {
    let title = sanitize_title(title);
    if is_final {
        format!("{title} - Episode {episode} {FINAL_EPISODE_MARKER}.{EPISODE_EXTENSION}")
    } else {
        format!("{title} - Episode {episode}.{EPISODE_EXTENSION}")
    }
}

fn sanitize_title(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
