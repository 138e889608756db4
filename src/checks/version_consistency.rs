//! Project file version check.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{Check, CheckResult};
use crate::config::IniFile;
use crate::context::ReleaseContext;

static CHANGELOG_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\s+\(([^)\s]+)\)").expect("valid changelog regex")
});

/// Version of the newest entry in a Debian changelog.
pub fn changelog_version(content: &str) -> Option<String> {
    let first = content.lines().find(|line| !line.trim().is_empty())?;
    CHANGELOG_HEADER
        .captures(first)
        .map(|caps| caps[2].to_string())
}

/// Passes when Python metadata and the Debian changelog both carry the release version.
pub struct VersionConsistency<'a> {
    ctx: &'a ReleaseContext,
}

impl<'a> VersionConsistency<'a> {
    pub fn new(ctx: &'a ReleaseContext) -> Self {
        Self { ctx }
    }

    fn check_metadata(&self, path: &Path) -> Option<String> {
        let expected = &self.ctx.python_version;
        let ini = match IniFile::load(path) {
            Ok(ini) => ini,
            Err(e) => return Some(format!("Could not read {}: {}", path.display(), e)),
        };

        match ini.get("metadata", "version") {
            Some(found) if found == expected => None,
            Some(found) => Some(format!(
                "{} has version {}, expected {}",
                path.display(),
                found,
                expected
            )),
            None => Some(format!("{} has no [metadata] version", path.display())),
        }
    }

    fn check_changelog(&self, path: &Path) -> Option<String> {
        let epoch = &self.ctx.config.package.epoch;
        let prefix = if epoch.is_empty() {
            format!("{}-", self.ctx.archive_version)
        } else {
            format!("{}:{}-", epoch, self.ctx.archive_version)
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return Some(format!("Could not read {}: {}", path.display(), e)),
        };

        match changelog_version(&content) {
            Some(found) if found.len() > prefix.len() && found.starts_with(&prefix) => None,
            Some(found) => Some(format!(
                "{} has version {}, expected {}<revision>",
                path.display(),
                found,
                prefix
            )),
            None => Some(format!("{} has no changelog entry", path.display())),
        }
    }
}

impl Check for VersionConsistency<'_> {
    fn title(&self) -> String {
        format!("Project files have version {}", self.ctx.version)
    }

    fn evaluate(&self) -> CheckResult {
        let package = &self.ctx.config.package;
        let problems: Vec<String> = [
            self.check_metadata(&self.ctx.project_path(&package.metadata_file)),
            self.check_changelog(&self.ctx.project_path(&package.changelog)),
        ]
        .into_iter()
        .flatten()
        .collect();

        if problems.is_empty() {
            CheckResult::pass()
        } else {
            CheckResult::fail(problems.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReleaseConfig;
    use crate::test_support::{release_context, GitFixture, GIT_LOCK};
    use std::fs;

    const CHANGELOG: &str = "maas (1:3.1.0~beta3-0ubuntu1) jammy; urgency=medium\n\n  * New upstream release.\n\n -- MAAS Team <maas@example.com>  Wed, 20 Oct 2021 10:00:00 +0000\n";

    fn write_files(fixture: &GitFixture, metadata_version: &str, changelog: &str) {
        let work = fixture.work();
        fs::write(
            work.join("setup.cfg"),
            format!("[metadata]\nname = maas\nversion = {}\n", metadata_version),
        )
        .unwrap();
        fs::create_dir_all(work.join("debian")).unwrap();
        fs::write(work.join("debian/changelog"), changelog).unwrap();
    }

    #[test]
    fn parses_changelog_header() {
        assert_eq!(
            changelog_version(CHANGELOG).as_deref(),
            Some("1:3.1.0~beta3-0ubuntu1")
        );
        assert_eq!(changelog_version("\n\nmaas (3.0) x; urgency=low").as_deref(), Some("3.0"));
        assert!(changelog_version("not a changelog").is_none());
        assert!(changelog_version("").is_none());
    }

    #[test]
    fn matching_files_pass() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        write_files(&fixture, "3.1.0b3", CHANGELOG);
        let ctx = release_context(&fixture, "3.1.0-beta3", ReleaseConfig::default());

        assert_eq!(VersionConsistency::new(&ctx).evaluate(), CheckResult::pass());
    }

    #[test]
    fn each_mismatch_is_reported() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        write_files(
            &fixture,
            "3.1.0b2",
            "maas (1:3.1.0~beta2-0ubuntu1) jammy; urgency=medium\n",
        );
        let ctx = release_context(&fixture, "3.1.0-beta3", ReleaseConfig::default());

        let result = VersionConsistency::new(&ctx).evaluate();
        assert!(!result.passed);
        let message = result.message.unwrap();
        assert_eq!(message.lines().count(), 2);
        assert!(message.contains("setup.cfg has version 3.1.0b2, expected 3.1.0b3"));
        assert!(message.contains("expected 1:3.1.0~beta3-<revision>"));
    }

    #[test]
    fn changelog_without_epoch_fails() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        write_files(&fixture, "3.1.0", "maas (3.1.0-0ubuntu1) jammy; urgency=medium\n");
        let ctx = release_context(&fixture, "3.1.0", ReleaseConfig::default());

        let result = VersionConsistency::new(&ctx).evaluate();
        assert!(!result.passed);
        assert_eq!(result.message.unwrap().lines().count(), 1);
    }

    #[test]
    fn missing_files_are_reported() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        let ctx = release_context(&fixture, "3.1.0", ReleaseConfig::default());

        let result = VersionConsistency::new(&ctx).evaluate();
        assert!(!result.passed);
        let message = result.message.unwrap();
        assert!(message.contains("setup.cfg"));
        assert!(message.contains("changelog"));
    }

    #[test]
    fn empty_epoch_is_supported() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        write_files(&fixture, "3.1.0rc1", "maas (3.1.0~rc1-1) jammy; urgency=medium\n");
        let mut config = ReleaseConfig::default();
        config.package.epoch = String::new();
        let ctx = release_context(&fixture, "3.1.0-rc1", config);

        assert!(VersionConsistency::new(&ctx).evaluate().passed);
    }
}
