//! Check command implementation.
//!
//! `release-status <VERSION>` loads the configuration and store
//! credentials, derives the release parameters and runs the full checklist.

use std::path::{Path, PathBuf};

use crate::checks::{default_checks, run_checks};
use crate::config::{load_config, ReleaseConfig};
use crate::context::ReleaseContext;
use crate::error::{ReleaseError, Result};
use crate::store::{default_credentials_path, StoreCredentials, LOGIN_HINT};
use crate::ui::UserInterface;
use crate::version::ReleaseVersion;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    version: ReleaseVersion,
    config_path: Option<PathBuf>,
    credentials_path: Option<PathBuf>,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(
        project_root: &Path,
        version: ReleaseVersion,
        config_path: Option<PathBuf>,
        credentials_path: Option<PathBuf>,
    ) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            version,
            config_path,
            credentials_path,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Pick the credential file: `--credentials`, then the configured path
    /// (relative to the project root), then the snapcraft default.
    fn credentials_file(&self, config: &ReleaseConfig) -> Result<PathBuf> {
        if let Some(path) = &self.credentials_path {
            return Ok(path.clone());
        }
        if let Some(path) = &config.store.credentials {
            return Ok(self.project_root.join(path));
        }
        default_credentials_path().ok_or_else(|| ReleaseError::CredentialsNotFound {
            path: PathBuf::from("snapcraft/snapcraft.cfg"),
            hint: LOGIN_HINT.to_string(),
        })
    }

    fn show_parameters(&self, ctx: &ReleaseContext, ui: &mut dyn UserInterface) {
        ui.message(&format!("Grade:            {}", ctx.grade));
        ui.message(&format!("Channel:          {}", ctx.channel));
        ui.message(&format!("Archive version:  {}", ctx.archive_version));
        ui.message(&format!("Python version:   {}", ctx.python_version));
        ui.message(&format!("Revision:         {}", ctx.short_rev));
        ui.message("");
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;

        // Reject unknown grades before touching credentials
        self.version.grade()?;

        let credentials_file = self.credentials_file(&config)?;
        tracing::debug!("Reading store credentials from {}", credentials_file.display());
        let auth = StoreCredentials::load(&credentials_file)?.authorization()?;

        let ctx = ReleaseContext::prepare(
            self.version.clone(),
            config,
            &self.project_root,
            Some(auth),
        )?;

        ui.show_header(&format!("Release checklist for {}", ctx.version));
        if ui.output_mode().shows_details() {
            self.show_parameters(&ctx, ui);
        }

        let checks = default_checks(&ctx);
        let report = run_checks(&checks, ui);
        tracing::debug!(
            "Ran {} checks in {:.1}s",
            report.total(),
            report.duration.as_secs_f64()
        );

        if report.all_passed() {
            ui.success("All checks PASSED!");
            Ok(CommandResult::success())
        } else {
            ui.show_failures(&report.failed_titles(), report.total());
            Ok(CommandResult::failure(1))
        }
    }
}
