//! Launchpad archive availability check.

use super::{missing_from, Check, CheckResult};
use crate::config::{ArchiveRef, ArchiveStage};
use crate::context::ReleaseContext;

/// Passes when the stage's archive exists and builds for every required architecture.
pub struct ArchiveAvailability<'a> {
    ctx: &'a ReleaseContext,
    stage: ArchiveStage,
}

impl<'a> ArchiveAvailability<'a> {
    pub fn new(ctx: &'a ReleaseContext, stage: ArchiveStage) -> Self {
        Self { ctx, stage }
    }

    fn archive(&self) -> ArchiveRef {
        self.ctx.archive(self.stage)
    }
}

impl Check for ArchiveAvailability<'_> {
    fn title(&self) -> String {
        format!("{} archive {} is ready", self.stage, self.archive())
    }

    fn evaluate(&self) -> CheckResult {
        let archive_ref = self.archive();
        let launchpad = &self.ctx.launchpad;

        let archive = match launchpad.archive(&archive_ref) {
            Ok(Some(archive)) => archive,
            Ok(None) => {
                return CheckResult::fail(format!(
                    "Archive {} does not exist. Create it on Launchpad.",
                    archive_ref
                ))
            }
            Err(e) => return CheckResult::unavailable("look up the archive", e),
        };

        let processors = match launchpad.archive_processors(&archive) {
            Ok(processors) => processors,
            Err(e) => return CheckResult::unavailable("list archive processors", e),
        };

        let missing = missing_from(&self.ctx.config.archives.architectures, &processors);
        if missing.is_empty() {
            CheckResult::pass()
        } else {
            CheckResult::fail(format!(
                "Archive {} does not build for: {}",
                archive_ref,
                missing.join(", ")
            ))
        }
    }
}
