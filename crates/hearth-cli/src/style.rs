//! Visual styling utilities for the CLI.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar characters
const PROGRESS_CHARS: &str = "##-";

/// Create a progress bar for the backfill download, counted in windows.
pub fn backfill_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] window {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars(PROGRESS_CHARS),
    );
    pb
}
