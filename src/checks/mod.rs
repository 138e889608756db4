//! Release-readiness checks.
//!
//! Each check answers one question about the release ("is the tag
//! pushed?", "is the snap in its channel?") by querying git, the local
//! tree, Launchpad or the snap store. Checks never change anything.
//!
//! - [`Check`] - The trait every check implements
//! - [`CheckResult`] - Pass/fail plus an optional explanation
//! - [`default_checks`] - The ordered checklist for a release
//! - [`runner`] - Evaluates a checklist and reports the outcome

pub mod archive;
pub mod build_artifact;
pub mod milestone;
pub mod package_published;
pub mod packages_copied;
pub mod release_branch;
pub mod release_tag;
pub mod runner;
pub mod snap_revisions;
pub mod snap_track;
pub mod version_consistency;
pub mod working_tree;

pub use archive::ArchiveAvailability;
pub use build_artifact::BuildArtifactPresent;
pub use milestone::MilestoneReleased;
pub use package_published::PackagePublished;
pub use packages_copied::PackagesCopiedBetweenArchives;
pub use release_branch::CommitOnReleaseBranch;
pub use release_tag::ReleaseTagged;
pub use runner::{run_checks, CheckOutcome, RunReport};
pub use snap_revisions::{SnapInChannel, SnapUploaded};
pub use snap_track::DistributionChannelTrack;
pub use version_consistency::VersionConsistency;
pub use working_tree::WorkingTreeClean;

use regex::Regex;

use crate::config::ArchiveStage;
use crate::context::ReleaseContext;
use crate::version::Grade;

/// Outcome of evaluating a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Whether the check passed.
    pub passed: bool,
    /// Explanation, possibly spanning several lines.
    pub message: Option<String>,
}

impl CheckResult {
    /// A passing result with no message.
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: None,
        }
    }

    /// A failing result.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: Some(message.into()),
        }
    }

    /// A failing result for a query that could not be completed.
    pub fn unavailable(what: &str, err: impl std::fmt::Display) -> Self {
        tracing::warn!("{} failed: {}", what, err);
        Self::fail(format!("Could not {}: {}", what, err))
    }
}

/// A single release-readiness question.
///
/// Implementations must not depend on each other's results and must turn
/// transport or subprocess failures into a failed [`CheckResult`].
pub trait Check {
    /// Short human-readable description of what is verified.
    fn title(&self) -> String;

    /// Run the check.
    fn evaluate(&self) -> CheckResult;
}

/// The full checklist for a release, in display order.
pub fn default_checks<'a>(ctx: &'a ReleaseContext) -> Vec<Box<dyn Check + 'a>> {
    let mut checks: Vec<Box<dyn Check + 'a>> = vec![
        Box::new(WorkingTreeClean::new(ctx)),
        Box::new(CommitOnReleaseBranch::new(ctx)),
        Box::new(VersionConsistency::new(ctx)),
        Box::new(DistributionChannelTrack::new(ctx)),
        Box::new(ArchiveAvailability::new(ctx, ArchiveStage::ReleasePreparation)),
        Box::new(ArchiveAvailability::new(ctx, ArchiveStage::Candidate)),
        Box::new(ArchiveAvailability::new(ctx, ArchiveStage::Stable)),
        Box::new(BuildArtifactPresent::new(ctx)),
        Box::new(PackagePublished::new(ctx, ArchiveStage::ReleasePreparation)),
        Box::new(PackagesCopiedBetweenArchives::new(
            ctx,
            ArchiveStage::ReleasePreparation,
            ArchiveStage::Candidate,
        )),
    ];

    if ctx.grade == Grade::Final {
        checks.push(Box::new(PackagesCopiedBetweenArchives::new(
            ctx,
            ArchiveStage::Candidate,
            ArchiveStage::Stable,
        )));
    }

    checks.push(Box::new(SnapUploaded::new(ctx)));
    checks.push(Box::new(SnapInChannel::new(ctx)));
    checks.push(Box::new(MilestoneReleased::new(ctx)));
    checks.push(Box::new(ReleaseTagged::new(ctx)));
    checks
}

/// Matches versions built from a revision: `[<epoch>:]<version>-<n>-g.<rev>` followed
/// by the end of the string or a further `-` suffix.
pub(crate) fn revision_version_regex(epoch: Option<&str>, version: &str, short_rev: &str) -> Regex {
    let epoch = epoch
        .filter(|e| !e.is_empty())
        .map(|e| format!("{}:", regex::escape(e)))
        .unwrap_or_default();
    let pattern = format!(
        r"^{}{}-\d+-g\.{}(?:-|$)",
        epoch,
        regex::escape(version),
        regex::escape(short_rev)
    );
    Regex::new(&pattern).expect("escaped version pattern is valid")
}

/// Entries of `required` that are absent from `present`, in `required` order.
pub(crate) fn missing_from<'r>(required: &'r [String], present: &[String]) -> Vec<&'r str> {
    required
        .iter()
        .filter(|item| !present.contains(item))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReleaseConfig;
    use crate::test_support::{GitFixture, GIT_LOCK};
    use crate::version::ReleaseVersion;

    fn titles(version: &str) -> Vec<String> {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        let ctx = ReleaseContext::prepare(
            ReleaseVersion::parse(version).unwrap(),
            ReleaseConfig::default(),
            &fixture.work(),
            None,
        )
        .unwrap();
        let titles: Vec<String> = default_checks(&ctx).iter().map(|c| c.title()).collect();
        titles
    }

    #[test]
    fn checklist_order_for_beta() {
        let titles = titles("3.1.0b3");

        assert_eq!(titles.len(), 14);
        assert!(titles[0].contains("No uncommitted changes"));
        assert!(titles[1].contains("master"));
        assert!(titles[4].contains("ppa:maas-committers/release-preparation"));
        assert!(titles[5].contains("ppa:maas/3.1-next"));
        assert!(titles[6].contains("ppa:maas/3.1"));
        assert!(titles[9].contains("ppa:maas/3.1-next"));
        assert!(titles[13].contains("3.1.0-beta3"));
    }

    #[test]
    fn final_release_adds_stable_copy_check() {
        let titles = titles("3.1.0");

        assert_eq!(titles.len(), 15);
        assert!(titles[10].contains("to ppa:maas/3.1"));
        assert!(titles[1].contains("3.1 branch"));
    }

    #[test]
    fn revision_regex_with_epoch() {
        let re = revision_version_regex(Some("1"), "3.1.0~beta3", "abcdef1");

        assert!(re.is_match("1:3.1.0~beta3-10001-g.abcdef1-0ubuntu1~22.04.1"));
        assert!(re.is_match("1:3.1.0~beta3-1-g.abcdef1"));
        assert!(!re.is_match("3.1.0~beta3-10001-g.abcdef1-0ubuntu1"));
        assert!(!re.is_match("1:3.1.0~beta3-10001-g.abcdef12-0ubuntu1"));
        assert!(!re.is_match("1:3.1.0~beta3-g.abcdef1"));
    }

    #[test]
    fn revision_regex_escapes_dots() {
        let re = revision_version_regex(None, "3.1.0", "abcdef1");
        assert!(re.is_match("3.1.0-5-g.abcdef1"));
        assert!(!re.is_match("3x1x0-5-g.abcdef1"));
    }

    #[test]
    fn missing_from_keeps_required_order() {
        let required: Vec<String> = ["amd64", "arm64", "ppc64el", "s390x"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let present = vec!["s390x".to_string(), "amd64".to_string()];
        assert_eq!(missing_from(&required, &present), vec!["arm64", "ppc64el"]);
    }

    #[test]
    fn unavailable_is_a_failure_with_context() {
        let result = CheckResult::unavailable("query Launchpad", "connection refused");
        assert!(!result.passed);
        assert_eq!(
            result.message.as_deref(),
            Some("Could not query Launchpad: connection refused")
        );
    }
}
