//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::ReleaseTheme;
use super::SpinnerHandle;

/// A spinner shown while a check runs.
pub struct ProgressSpinner {
    bar: ProgressBar,
    visible: bool,
    theme: ReleaseTheme,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str, theme: ReleaseTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.magenta} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar,
            visible: true,
            theme,
        }
    }

    /// A spinner that draws nothing while running and only reports failures.
    pub fn hidden(theme: ReleaseTheme) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            visible: false,
            theme,
        }
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.visible {
            let line = self.theme.format_success(msg);
            self.finish_with(line);
        } else {
            self.bar.finish_and_clear();
        }
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        if self.visible {
            self.finish_with(line);
        } else {
            self.bar.finish_and_clear();
            println!("{}", line);
        }
    }
}
