//! Release tag check.

use super::{Check, CheckResult};
use crate::context::ReleaseContext;

/// Passes when the version tag is annotated, points at `HEAD` and is pushed.
pub struct ReleaseTagged<'a> {
    ctx: &'a ReleaseContext,
}

impl<'a> ReleaseTagged<'a> {
    pub fn new(ctx: &'a ReleaseContext) -> Self {
        Self { ctx }
    }
}

impl Check for ReleaseTagged<'_> {
    fn title(&self) -> String {
        format!("Tag {} is pushed", self.ctx.version)
    }

    fn evaluate(&self) -> CheckResult {
        let git = &self.ctx.git;
        let tag = self.ctx.version.as_str();
        let remote = &self.ctx.config.git.remote;

        let Ok(tag_rev) = git.short_rev(tag) else {
            return CheckResult::fail(format!(
                "Tag {} does not exist. Create it with `git tag -a {} -m {}`",
                tag, tag, tag
            ));
        };
        let commit_rev = match git.short_rev(&format!("{}^{{commit}}", tag)) {
            Ok(rev) => rev,
            Err(e) => return CheckResult::unavailable("resolve the tagged commit", e),
        };

        // A lightweight tag resolves to the commit itself.
        if commit_rev == tag_rev {
            return CheckResult::fail(format!(
                "Tag {} is not annotated. Recreate it with `git tag -a -f {} -m {}`",
                tag, tag, tag
            ));
        }

        if commit_rev != self.ctx.short_rev {
            return CheckResult::fail(format!(
                "Tag {} points to {}, not the current commit {}",
                tag, commit_rev, self.ctx.short_rev
            ));
        }

        match git.remote_has_tag(remote, tag) {
            Ok(true) => CheckResult::pass(),
            Ok(false) => CheckResult::fail(format!(
                "Tag {} is not on {}. Push it with `git push {} {}`",
                tag, remote, remote, tag
            )),
            Err(e) => CheckResult::unavailable("list remote tags", e),
        }
    }
}
