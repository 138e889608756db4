//! Launchpad milestone check.

use super::{Check, CheckResult};
use crate::context::ReleaseContext;

/// Passes when the Launchpad project has a milestone named after the version.
pub struct MilestoneReleased<'a> {
    ctx: &'a ReleaseContext,
}

impl<'a> MilestoneReleased<'a> {
    pub fn new(ctx: &'a ReleaseContext) -> Self {
        Self { ctx }
    }
}

impl Check for MilestoneReleased<'_> {
    fn title(&self) -> String {
        format!(
            "Milestone {} exists in {}",
            self.ctx.version, self.ctx.config.launchpad.project
        )
    }

    fn evaluate(&self) -> CheckResult {
        let project = &self.ctx.config.launchpad.project;
        match self.ctx.launchpad.milestone(project, self.ctx.version.as_str()) {
            Ok(Some(_)) => CheckResult::pass(),
            Ok(None) => CheckResult::fail(format!(
                "Milestone {} does not exist. Create it at https://launchpad.net/{}/+addmilestone",
                self.ctx.version, project
            )),
            Err(e) => CheckResult::unavailable("look up the milestone", e),
        }
    }
}
