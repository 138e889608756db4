//! Release commit branch check.

use super::{Check, CheckResult};
use crate::context::ReleaseContext;
use crate::version::release_branch;

/// Passes when `HEAD` is reachable from the remote release branch.
///
/// Alpha and beta releases are cut from the development branch; release
/// candidates and finals from the `<major>` maintenance branch.
pub struct CommitOnReleaseBranch<'a> {
    ctx: &'a ReleaseContext,
}

impl<'a> CommitOnReleaseBranch<'a> {
    pub fn new(ctx: &'a ReleaseContext) -> Self {
        Self { ctx }
    }

    fn branch(&self) -> String {
        release_branch(self.ctx.version.as_str(), &self.ctx.config.git.dev_branch)
    }
}

impl Check for CommitOnReleaseBranch<'_> {
    fn title(&self) -> String {
        format!("Commit is on the {} branch", self.branch())
    }

    fn evaluate(&self) -> CheckResult {
        let remote = &self.ctx.config.git.remote;
        let expected = format!("{}/{}", remote, self.branch());

        let branches = match self.ctx.git.remote_branches_containing(&self.ctx.short_rev) {
            Ok(branches) => branches,
            Err(e) => return CheckResult::unavailable("list remote branches", e),
        };

        if branches.contains(&expected) {
            return CheckResult::pass();
        }

        let mut message = format!(
            "Commit {} is not on {}.",
            self.ctx.short_rev, expected
        );
        if branches.is_empty() {
            message.push_str(&format!("\nIt is not on any {} branch yet; push it first.", remote));
        } else {
            message.push_str(&format!("\nIt is on: {}", branches.join(", ")));
        }
        CheckResult::fail(message)
    }
}
