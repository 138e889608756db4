//! Uncommitted changes check.

use super::{Check, CheckResult};
use crate::context::ReleaseContext;

/// Shown when tracked files differ from `HEAD`.
pub const UNCOMMITTED_CHANGES: &str =
    "There are uncommitted changes. Commit or stash them before releasing.";

/// Passes when no tracked file has staged or unstaged changes.
pub struct WorkingTreeClean<'a> {
    ctx: &'a ReleaseContext,
}

impl<'a> WorkingTreeClean<'a> {
    pub fn new(ctx: &'a ReleaseContext) -> Self {
        Self { ctx }
    }
}

impl Check for WorkingTreeClean<'_> {
    fn title(&self) -> String {
        "No uncommitted changes".to_string()
    }

    fn evaluate(&self) -> CheckResult {
        match self.ctx.git.has_uncommitted_changes() {
            Ok(false) => CheckResult::pass(),
            Ok(true) => CheckResult::fail(UNCOMMITTED_CHANGES),
            Err(e) => CheckResult::unavailable("inspect the working tree", e),
        }
    }
}
