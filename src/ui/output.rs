//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also show the derived release parameters.
    Verbose,
    /// Show every check and its messages.
    #[default]
    Normal,
    /// Show only failed checks and the final verdict.
    Quiet,
}

impl OutputMode {
    /// Pick a mode from the `--verbose`/`--quiet` flags. Quiet wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Whether passing checks are listed.
    pub fn shows_passing(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Whether progress spinners are drawn.
    pub fn shows_spinners(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Whether extra detail is printed.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}
