//! Per-run release parameters shared by every check.

use std::path::{Path, PathBuf};

use crate::config::{ArchiveRef, ArchiveStage, ReleaseConfig};
use crate::error::Result;
use crate::launchpad::LaunchpadClient;
use crate::store::{SnapStoreClient, StoreAuth};
use crate::vcs::Git;
use crate::version::{derive_channel, Grade, ReleaseVersion};

/// Everything a check needs to know about the release being verified.
///
/// Built once at startup by [`ReleaseContext::prepare`]; checks only read it.
pub struct ReleaseContext {
    pub version: ReleaseVersion,
    pub major: String,
    pub grade: Grade,
    pub channel: String,
    /// Version as spelled in Debian packaging (`3.1.0~beta3`).
    pub archive_version: String,
    /// Version as spelled in Python metadata (`3.1.0b3`).
    pub python_version: String,
    /// Abbreviated id of `HEAD`.
    pub short_rev: String,
    pub project_root: PathBuf,
    pub config: ReleaseConfig,
    pub git: Git,
    pub store: SnapStoreClient,
    pub launchpad: LaunchpadClient,
}

impl ReleaseContext {
    /// Derive the release parameters and build the clients.
    ///
    /// Fails on an unrecognized grade or when the current revision cannot be
    /// resolved.
    pub fn prepare(
        version: ReleaseVersion,
        config: ReleaseConfig,
        project_root: &Path,
        auth: Option<StoreAuth>,
    ) -> Result<Self> {
        let grade = version.grade()?;
        let major = version.major();
        let git = Git::new(project_root);
        let short_rev = git.short_rev("HEAD")?;

        tracing::debug!(
            "Preparing checks for {} ({} grade) at {}",
            version,
            grade,
            short_rev
        );

        let store = SnapStoreClient::new(&config.store.api_url, &config.store.dashboard_url, auth);
        let launchpad = LaunchpadClient::new(&config.launchpad.api_url);

        Ok(Self {
            channel: derive_channel(&major, grade),
            archive_version: version.archive(),
            python_version: version.python(),
            major,
            grade,
            version,
            short_rev,
            project_root: project_root.to_path_buf(),
            config,
            git,
            store,
            launchpad,
        })
    }

    /// Resolve a path from the configuration against the project root.
    pub fn project_path(&self, path: &Path) -> PathBuf {
        self.project_root.join(path)
    }

    /// The archive used for a release stage.
    pub fn archive(&self, stage: ArchiveStage) -> ArchiveRef {
        self.config.archives.archive_for(stage, &self.major)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{GitFixture, GIT_LOCK};

    #[test]
    fn derives_release_parameters() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();

        let ctx = ReleaseContext::prepare(
            ReleaseVersion::parse("3.1.0b3").unwrap(),
            ReleaseConfig::default(),
            &fixture.work(),
            None,
        )
        .unwrap();

        assert_eq!(ctx.version.as_str(), "3.1.0-beta3");
        assert_eq!(ctx.major, "3.1");
        assert_eq!(ctx.grade, Grade::Beta);
        assert_eq!(ctx.channel, "3.1/beta");
        assert_eq!(ctx.archive_version, "3.1.0~beta3");
        assert_eq!(ctx.python_version, "3.1.0b3");
        assert_eq!(ctx.short_rev, fixture.short_head());
        assert_eq!(ctx.archive(ArchiveStage::Candidate).to_string(), "ppa:maas/3.1-next");
    }

    #[test]
    fn unknown_grade_is_fatal() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();

        let result = ReleaseContext::prepare(
            ReleaseVersion::parse("3.1.0a1").unwrap(),
            ReleaseConfig::default(),
            &fixture.work(),
            None,
        );
        assert!(matches!(
            result.err(),
            Some(crate::error::ReleaseError::UnknownGrade { .. })
        ));
    }

    #[test]
    fn outside_a_repository_is_fatal() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = ReleaseContext::prepare(
            ReleaseVersion::parse("3.1.0").unwrap(),
            ReleaseConfig::default(),
            temp.path(),
            None,
        );
        assert!(matches!(
            result.err(),
            Some(crate::error::ReleaseError::GitFailed { .. })
        ));
    }
}
