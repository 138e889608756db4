//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::ui::OutputMode;
use crate::version::ReleaseVersion;

/// Check whether everything is in place for a release.
#[derive(Debug, Parser)]
#[command(name = "release-status")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Version being released, e.g. 3.1.0, 3.1.0b3, 3.1.0rc1 or 3.1.0-beta3
    #[arg(id = "release_version", value_name = "VERSION")]
    pub version: ReleaseVersion,

    /// Path to project root (overrides current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Path to config file (overrides default .release-status.yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Snap store credential file (overrides the snapcraft login file)
    #[arg(long, env = "RELEASE_STATUS_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only show failing checks
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Output mode selected by `--verbose`/`--quiet`.
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.verbose, self.quiet)
    }
}
