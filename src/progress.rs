//! Spinner display for long-running fetches

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a repository is being fetched.
///
/// Callers finish it with `finish_and_clear()`; the line disappears so the
/// command output stays clean.
pub fn fetch_spinner(url: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} Fetching {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(url.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
