//! Progress line shown while repositories are being checked

use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use super::config::{
    CHECKING_MESSAGE, PATH_DISPLAY_WIDTH, PROGRESS_TEMPLATE, PROGRESS_TICK_CHARS,
    PROGRESS_TICK_MILLIS,
};
use crate::utils::shorten_path;

/// Creates a progress bar style configuration
/// Returns a ProgressStyle configured with the application's visual styling
pub(crate) fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_spinner()
        .template(PROGRESS_TEMPLATE)?
        .tick_chars(PROGRESS_TICK_CHARS))
}

/// Single redrawn status line reporting which directory is being checked
pub struct CheckProgress {
    bar: ProgressBar,
}

impl CheckProgress {
    /// Creates the spinner on stderr, or a hidden one when `visible` is false
    pub fn new(total: usize, visible: bool) -> Result<Self> {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(total as u64), target);
        bar.set_style(create_progress_style()?);
        if visible {
            bar.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MILLIS));
        }
        Ok(Self { bar })
    }

    /// Progress callback: redraws the line for the directory about to be validated
    pub fn report(&self, path: &Path) {
        let shown = shorten_path(&path.to_string_lossy(), PATH_DISPLAY_WIDTH);
        let position = self.bar.position() + 1;
        let total = self.bar.length().unwrap_or(position);
        self.bar
            .set_message(format!("[{position}/{total}] {CHECKING_MESSAGE} {shown}"));
        self.bar.inc(1);
    }

    /// Removes the line so the report starts on a clean terminal row
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
