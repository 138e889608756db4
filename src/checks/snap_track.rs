//! Snap store track check.

use super::{Check, CheckResult};
use crate::context::ReleaseContext;

/// Passes when the store has a track named after the major version.
pub struct DistributionChannelTrack<'a> {
    ctx: &'a ReleaseContext,
}

impl<'a> DistributionChannelTrack<'a> {
    pub fn new(ctx: &'a ReleaseContext) -> Self {
        Self { ctx }
    }
}

impl Check for DistributionChannelTrack<'_> {
    fn title(&self) -> String {
        format!(
            "Snap track {} exists for {}",
            self.ctx.major, self.ctx.config.store.snap
        )
    }

    fn evaluate(&self) -> CheckResult {
        match self
            .ctx
            .store
            .track_exists(&self.ctx.config.store.snap, &self.ctx.major)
        {
            Ok(()) => CheckResult::pass(),
            Err(e) => {
                tracing::warn!("Track lookup failed: {}", e);
                CheckResult::fail(e.to_string())
            }
        }
    }
}
