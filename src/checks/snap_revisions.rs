//! Snap upload and channel release checks.
//!
//! Both checks look at the store's revision history for revisions built
//! from the current commit: versions starting with the archive version and
//! ending in `-g.<short rev>`. The history endpoint only returns the most
//! recent revisions, so an old upload can drop out of view.

use std::collections::BTreeMap;

use super::{Check, CheckResult};
use crate::context::ReleaseContext;
use crate::store::{SnapRevision, StoreError, HISTORY_LIMIT};

/// Revisions built from the current commit, grouped by architecture.
fn revisions_by_arch(ctx: &ReleaseContext) -> Result<BTreeMap<String, Vec<SnapRevision>>, StoreError> {
    let snap_id = ctx.store.snap_id(&ctx.config.store.snap)?;
    let history = ctx.store.revision_history(&snap_id)?;
    let suffix = format!("-g.{}", ctx.short_rev);

    let mut grouped: BTreeMap<String, Vec<SnapRevision>> = BTreeMap::new();
    for revision in history {
        if revision.version.starts_with(&ctx.archive_version) && revision.version.ends_with(&suffix)
        {
            grouped
                .entry(revision.arch.clone())
                .or_default()
                .push(revision);
        }
    }
    Ok(grouped)
}

fn store_failure(err: StoreError) -> CheckResult {
    tracing::warn!("Snap history lookup failed: {}", err);
    CheckResult::fail(err.to_string())
}

/// Passes when every required architecture has an uploaded revision of this commit.
pub struct SnapUploaded<'a> {
    ctx: &'a ReleaseContext,
}

impl<'a> SnapUploaded<'a> {
    pub fn new(ctx: &'a ReleaseContext) -> Self {
        Self { ctx }
    }
}

impl Check for SnapUploaded<'_> {
    fn title(&self) -> String {
        format!(
            "{} snap for {} is uploaded",
            self.ctx.config.store.snap, self.ctx.version
        )
    }

    fn evaluate(&self) -> CheckResult {
        let grouped = match revisions_by_arch(self.ctx) {
            Ok(grouped) => grouped,
            Err(e) => return store_failure(e),
        };

        let missing: Vec<&str> = self
            .ctx
            .config
            .archives
            .architectures
            .iter()
            .map(String::as_str)
            .filter(|arch| !grouped.contains_key(*arch))
            .collect();

        if missing.is_empty() {
            CheckResult::pass()
        } else {
            CheckResult::fail(format!(
                "No revision of {} at {} uploaded for: {}\n(only the latest {} revisions are searched)",
                self.ctx.archive_version,
                self.ctx.short_rev,
                missing.join(", "),
                HISTORY_LIMIT
            ))
        }
    }
}

/// Passes when every required architecture has a revision of this commit released to the channel.
pub struct SnapInChannel<'a> {
    ctx: &'a ReleaseContext,
}

impl<'a> SnapInChannel<'a> {
    pub fn new(ctx: &'a ReleaseContext) -> Self {
        Self { ctx }
    }
}

impl Check for SnapInChannel<'_> {
    fn title(&self) -> String {
        format!(
            "{} snap for {} is released to {}",
            self.ctx.config.store.snap, self.ctx.version, self.ctx.channel
        )
    }

    fn evaluate(&self) -> CheckResult {
        let grouped = match revisions_by_arch(self.ctx) {
            Ok(grouped) => grouped,
            Err(e) => return store_failure(e),
        };

        let channel = &self.ctx.channel;
        let missing: Vec<&str> = self
            .ctx
            .config
            .archives
            .architectures
            .iter()
            .map(String::as_str)
            .filter(|arch| {
                !grouped
                    .get(*arch)
                    .is_some_and(|revs| revs.iter().any(|r| r.channels.contains(channel)))
            })
            .collect();

        if missing.is_empty() {
            CheckResult::pass()
        } else {
            CheckResult::fail(format!(
                "Not released to {} for: {}",
                channel,
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

    fn mock_store(server: &MockServer, history: serde_json::Value) {
        server.mock(|when, then| {
            when.method(GET).path("/api/v2/snaps/info/maas");
            then.status(200).json_body(serde_json::json!({"snap-id": "SNAPID"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/dev/api/snaps/SNAPID/history");
            then.status(200).json_body(history);
        });
    }

    fn revision(rev: u64, version: &str, arch: &str, channels: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "revision": rev,
            "version": version,
            "arch": arch,
            "channels": channels,
        })
    }

    #[test]
    fn uploaded_and_released_for_all_arches() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        let server = MockServer::start();
        let version = format!("3.1.0~beta3-10001-g.{}", fixture.short_head());
        mock_store(
            &server,
            serde_json::json!([
                revision(10, &version, "amd64", &["3.1/beta"]),
                revision(11, &version, "arm64", &["3.1/beta", "3.1/edge"]),
                revision(12, &version, "ppc64el", &["3.1/beta"]),
                revision(13, &version, "s390x", &["3.1/beta"]),
            ]),
        );
        let ctx = release_context(&fixture, "3.1.0-beta3", config_for_server(&server.base_url()));

        assert!(SnapUploaded::new(&ctx).evaluate().passed);
        let in_channel = SnapInChannel::new(&ctx);
        assert_eq!(in_channel.title(), "maas snap for 3.1.0-beta3 is released to 3.1/beta");
        assert!(in_channel.evaluate().passed);
    }

    #[test]
    fn other_revisions_are_ignored() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        let server = MockServer::start();
        let version = format!("3.1.0~beta3-10001-g.{}", fixture.short_head());
        mock_store(
            &server,
            serde_json::json!([
                revision(10, &version, "amd64", &[]),
                revision(9, "3.1.0~beta2-9000-g.0000000", "arm64", &["3.1/beta"]),
                revision(8, &format!("3.0.0-1-g.{}", fixture.short_head()), "ppc64el", &[]),
            ]),
        );
        let ctx = release_context(&fixture, "3.1.0-beta3", config_for_server(&server.base_url()));

        let result = SnapUploaded::new(&ctx).evaluate();
        assert!(!result.passed);
        let message = result.message.unwrap();
        assert!(message.contains("for: arm64, ppc64el, s390x"));
        assert!(message.contains("latest 500 revisions"));
    }

    #[test]
    fn uploaded_but_not_released() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        let server = MockServer::start();
        let version = format!("3.1.0-10001-g.{}", fixture.short_head());
        mock_store(
            &server,
            serde_json::json!([
                revision(20, &version, "amd64", &["3.1/stable"]),
                revision(21, &version, "arm64", &["3.1/candidate"]),
                revision(22, &version, "ppc64el", &["3.1/stable"]),
                revision(23, &version, "s390x", &[]),
            ]),
        );
        let ctx = release_context(&fixture, "3.1.0", config_for_server(&server.base_url()));

        assert!(SnapUploaded::new(&ctx).evaluate().passed);
        let result = SnapInChannel::new(&ctx).evaluate();
        assert!(!result.passed);
        assert_eq!(
            result.message.as_deref(),
            Some("Not released to 3.1/stable for: arm64, s390x")
        );
    }

    #[test]
    fn permission_error_is_a_failure() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = GitFixture::new();
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v2/snaps/info/maas");
            then.status(200).json_body(serde_json::json!({"snap-id": "SNAPID"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/dev/api/snaps/SNAPID/history");
            then.status(403).json_body(serde_json::json!({
                "error_list": [{"code": "macaroon-permission-required", "message": ""}]
            }));
        });
        let ctx = release_context(&fixture, "3.1.0", config_for_server(&server.base_url()));

        let result = SnapInChannel::new(&ctx).evaluate();
        assert!(!result.passed);
        assert!(result.message.unwrap().contains("macaroon-permission-required"));
    }
}
