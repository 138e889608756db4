//! Package copy check.

use std::collections::BTreeSet;

use super::{Check, CheckResult};
use crate::config::ArchiveStage;
use crate::context::ReleaseContext;
use crate::launchpad::SourcePublication;

/// Passes when every source published in one archive is also published in another.
pub struct PackagesCopiedBetweenArchives<'a> {
    ctx: &'a ReleaseContext,
    from: ArchiveStage,
    to: ArchiveStage,
}

impl<'a> PackagesCopiedBetweenArchives<'a> {
    pub fn new(ctx: &'a ReleaseContext, from: ArchiveStage, to: ArchiveStage) -> Self {
        Self { ctx, from, to }
    }

    fn sources(&self, stage: ArchiveStage) -> anyhow::Result<Vec<SourcePublication>> {
        self.ctx.launchpad.published_sources(
            &self.ctx.archive(stage),
            &self.ctx.config.archives.series,
            None,
        )
    }
}

/// `(name, version)` pairs of `source` that are absent from `target`.
pub fn missing_copies<'s>(
    source: &'s [SourcePublication],
    target: &[SourcePublication],
) -> Vec<&'s SourcePublication> {
    let present: BTreeSet<(&str, &str)> = target
        .iter()
        .map(|p| (p.source_package_name.as_str(), p.source_package_version.as_str()))
        .collect();

    source
        .iter()
        .filter(|p| {
            !present.contains(&(
                p.source_package_name.as_str(),
                p.source_package_version.as_str(),
            ))
        })
        .collect()
}

impl Check for PackagesCopiedBetweenArchives<'_> {
    fn title(&self) -> String {
        format!(
            "Packages copied from {} to {}",
            self.ctx.archive(self.from),
            self.ctx.archive(self.to)
        )
    }

    fn evaluate(&self) -> CheckResult {
        let source = match self.sources(self.from) {
            Ok(sources) => sources,
            Err(e) => return CheckResult::unavailable("list source archive packages", e),
        };
        let target = match self.sources(self.to) {
            Ok(sources) => sources,
            Err(e) => return CheckResult::unavailable("list target archive packages", e),
        };

        let missing = missing_copies(&source, &target);
        if missing.is_empty() {
            return CheckResult::pass();
        }

        let lines: Vec<String> = missing
            .iter()
            .map(|p| format!("{} {}", p.source_package_name, p.source_package_version))
            .collect();
        CheckResult::fail(format!(
            "Not yet copied to {}:\n{}",
            self.ctx.archive(self.to),
            lines.join("\n")
        ))
    }
}
