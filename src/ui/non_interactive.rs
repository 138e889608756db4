//! Non-interactive UI for CI and piped output.

use super::theme::ReleaseTheme;
use super::{OutputMode, SpinnerHandle, StatusKind, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Nothing is animated: each check prints one line when it finishes.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: ReleaseTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: ReleaseTheme::detect(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn detail(&mut self, msg: &str) {
        println!("{}", self.theme.format_detail(msg));
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(LineSpinner {
            show_success: self.mode.shows_passing(),
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_passing() {
            println!("\n{}\n", self.theme.format_header(title));
        }
    }

    fn show_failures(&mut self, failed: &[String], total: usize) {
        eprintln!();
        eprintln!("  ┌─ {} of {} checks FAILED", failed.len(), total);
        for title in failed {
            eprintln!("  │ {}", StatusKind::Failed.format_plain(title));
        }
        eprintln!("  └────────────────────────────────────");
    }
}

/// Prints the outcome line once the check finishes.
struct LineSpinner {
    show_success: bool,
    theme: ReleaseTheme,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.show_success {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        println!("{}", self.theme.format_error(msg));
    }
}
