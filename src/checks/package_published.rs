//! Package publication check.

use std::collections::BTreeSet;

use super::{revision_version_regex, Check, CheckResult};
use crate::config::{ArchiveRef, ArchiveStage};
use crate::context::ReleaseContext;

/// Passes when the archive publishes exactly one source for this revision,
/// with binaries for every required architecture.
pub struct PackagePublished<'a> {
    ctx: &'a ReleaseContext,
    stage: ArchiveStage,
}

impl<'a> PackagePublished<'a> {
    pub fn new(ctx: &'a ReleaseContext, stage: ArchiveStage) -> Self {
        Self { ctx, stage }
    }

    fn archive(&self) -> ArchiveRef {
        self.ctx.archive(self.stage)
    }
}

impl Check for PackagePublished<'_> {
    fn title(&self) -> String {
        format!(
            "{} {} is published in {}",
            self.ctx.config.package.name,
            self.ctx.version,
            self.archive()
        )
    }

    fn evaluate(&self) -> CheckResult {
        let ctx = self.ctx;
        let archive = self.archive();
        let package = &ctx.config.package.name;
        let series = &ctx.config.archives.series;
        let version_re = revision_version_regex(
            Some(&ctx.config.package.epoch),
            &ctx.archive_version,
            &ctx.short_rev,
        );

        let sources = match ctx
            .launchpad
            .published_sources(&archive, series, Some(package))
        {
            Ok(sources) => sources,
            Err(e) => return CheckResult::unavailable("list published sources", e),
        };
        let matching: Vec<_> = sources
            .iter()
            .filter(|s| s.source_package_name == *package)
            .filter(|s| version_re.is_match(&s.source_package_version))
            .collect();

        match matching.as_slice() {
            [_] => {}
            [] => {
                return CheckResult::fail(format!(
                    "No {} source for {} at revision {} is published for {} in {}",
                    package, ctx.archive_version, ctx.short_rev, series, archive
                ))
            }
            many => {
                let versions: Vec<_> = many
                    .iter()
                    .map(|s| s.source_package_version.as_str())
                    .collect();
                return CheckResult::fail(format!(
                    "More than one matching {} source in {}:\n{}",
                    package,
                    archive,
                    versions.join("\n")
                ));
            }
        }

        let binaries = match ctx.launchpad.published_binaries(&archive, package) {
            Ok(binaries) => binaries,
            Err(e) => return CheckResult::unavailable("list published binaries", e),
        };
        let built: BTreeSet<&str> = binaries
            .iter()
            .filter(|b| b.series() == series.as_str())
            .filter(|b| version_re.is_match(&b.binary_package_version))
            .map(|b| b.arch())
            .collect();

        let missing: Vec<&str> = ctx
            .config
            .archives
            .architectures
            .iter()
            .map(String::as_str)
            .filter(|arch| !built.contains(arch))
            .collect();

        if missing.is_empty() {
            CheckResult::pass()
        } else {
            CheckResult::fail(format!(
                "No published {} binaries in {} for: {}",
                package,
                archive,
                missing.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{config_for_server, release_context, GitFixture, GIT_LOCK};
    use httpmock::prelude::*;

    const ARCHIVE_PATH: &str = "/~maas-committers/+archive/ubuntu/release-preparation";

    fn mock_sources(server: &MockServer, versions: &[String]) {
        let entries: Vec<_> = versions
            .iter()
            .map(|v| serde_json::json!({"source_package_name": "maas", "source_package_version": v}))
            .collect();
        server.mock(|when, then| {
            when.method(GET)
                .path(ARCHIVE_PATH)
                .query_param("ws.op", "getPublishedSources");
            then.status(200).json_body(serde_json::json!({"entries": entries}));
        });
    }

    fn mock_binaries(server: &MockServer, version: &str, arches: &[&str]) {
        let entries: Vec<_> = arches
            .iter()
            .map(|arch| {
                serde_json::json!({
                    "binary_package_name": "maas",
                    "binary_package_version": version,
                    "distro_arch_series_link": format!("https://lp/ubuntu/jammy/{}", arch),
                })
            })
            .collect();
        server.mock(|when, then| {
            when.method(GET)
                .path(ARCHIVE_PATH)
                .query_param("ws.op", "getPublishedBinaries");
            then.status(200).json_body(serde_json::json!({"entries": entries}));
        });
    }

    #[test]
    fn published_source_and_binaries_pass() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        let server = MockServer::start();
        let version = format!("1:3.1.0~beta3-10001-g.{}-0ubuntu1~22.04.1", fixture.short_head());
        mock_sources(&server, &[version.clone(), "1:3.0.0-9000-g.1111111-0ubuntu1".into()]);
        mock_binaries(&server, &version, &["amd64", "arm64", "ppc64el", "s390x"]);
        let ctx = release_context(&fixture, "3.1.0-beta3", config_for_server(&server.base_url()));

        let check = PackagePublished::new(&ctx, ArchiveStage::ReleasePreparation);
        assert!(check.title().contains("ppa:maas-committers/release-preparation"));
        assert_eq!(check.evaluate(), CheckResult::pass());
    }

    #[test]
    fn missing_source_fails() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        let server = MockServer::start();
        mock_sources(&server, &["1:3.1.0~beta2-9999-g.1234567-0ubuntu1".into()]);
        let ctx = release_context(&fixture, "3.1.0-beta3", config_for_server(&server.base_url()));

        let result = PackagePublished::new(&ctx, ArchiveStage::ReleasePreparation).evaluate();
        assert!(!result.passed);
        assert!(result.message.unwrap().starts_with("No maas source"));
    }

    #[test]
    fn duplicate_sources_fail() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        let server = MockServer::start();
        let rev = fixture.short_head();
        mock_sources(
            &server,
            &[
                format!("1:3.1.0-10001-g.{}-0ubuntu1", rev),
                format!("1:3.1.0-10001-g.{}-0ubuntu2", rev),
            ],
        );
        let ctx = release_context(&fixture, "3.1.0", config_for_server(&server.base_url()));

        let result = PackagePublished::new(&ctx, ArchiveStage::ReleasePreparation).evaluate();
        assert!(!result.passed);
        assert!(result.message.unwrap().contains("More than one"));
    }

    #[test]
    fn missing_binary_architectures_are_listed() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        let server = MockServer::start();
        let version = format!("1:3.1.0~rc1-10001-g.{}-0ubuntu1", fixture.short_head());
        mock_sources(&server, &[version.clone()]);
        mock_binaries(&server, &version, &["amd64", "s390x"]);
        let ctx = release_context(&fixture, "3.1.0-rc1", config_for_server(&server.base_url()));

        let result = PackagePublished::new(&ctx, ArchiveStage::ReleasePreparation).evaluate();
        assert!(!result.passed);
        assert!(result.message.unwrap().ends_with("for: arm64, ppc64el"));
    }
}
