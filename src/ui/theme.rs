//! Visual theme and styling.

use console::Style;

use super::icons::StatusKind;

/// Terminal styles.
#[derive(Debug, Clone)]
pub struct ReleaseTheme {
    /// Style for passing checks (green).
    pub success: Style,
    /// Style for failures (red bold).
    pub error: Style,
    /// Style for check messages and secondary text.
    pub dim: Style,
    /// Style for highlighted text (bold).
    pub highlight: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
}

impl Default for ReleaseTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
            border: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            border: Style::new(),
        }
    }

    /// Colored theme when [`should_use_colors`] allows it, plain otherwise.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success line (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!(
            "{}",
            self.success
                .apply_to(format!("{} {}", StatusKind::Success.icon(), msg))
        )
    }

    /// Format an error line (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!(
            "{}",
            self.error
                .apply_to(format!("{} {}", StatusKind::Failed.icon(), msg))
        )
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("◆"),
            self.highlight.apply_to(title)
        )
    }

    /// Format a check message line, indented under its title.
    pub fn format_detail(&self, line: &str) -> String {
        format!("    {}", self.dim.apply_to(line))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::colors_enabled() && console::Term::stdout().is_term()
}
