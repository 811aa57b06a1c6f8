//! Spinner shown while waiting for a non-streamed answer

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner on stderr; hidden when progress display is disabled.
pub struct ThinkingSpinner {
    bar: ProgressBar,
}

impl ThinkingSpinner {
    pub fn start(message: &str, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        // Constant template; default style if rejected
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        if visible {
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        Self { bar }
    }

    /// Remove the spinner line.
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for ThinkingSpinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
