//! Shared fixtures for unit tests.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

use crate::config::ReleaseConfig;
use crate::context::ReleaseContext;
use crate::version::ReleaseVersion;

// Serialize git-process tests to avoid flaky failures under parallel execution
pub static GIT_LOCK: Mutex<()> = Mutex::new(());

/// A working clone of a local bare `origin`, with one pushed commit on `master`.
pub struct GitFixture {
    temp: TempDir,
}

impl GitFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let bare = temp.path().join("origin.git");
        let work = temp.path().join("work");

        run_git(
            temp.path(),
            &[
                "init",
                "--bare",
                "--initial-branch=master",
                bare.to_string_lossy().as_ref(),
            ],
        );
        run_git(
            temp.path(),
            &[
                "clone",
                bare.to_string_lossy().as_ref(),
                work.to_string_lossy().as_ref(),
            ],
        );

        let fixture = Self { temp };
        for (key, val) in [
            ("user.name", "Test"),
            ("user.email", "test@test.com"),
            ("commit.gpgsign", "false"),
            ("tag.gpgsign", "false"),
        ] {
            fixture.git(&["config", key, val]);
        }
        fixture.git(&["symbolic-ref", "HEAD", "refs/heads/master"]);

        std::fs::write(fixture.work().join("README"), "release fixture\n").unwrap();
        fixture.git(&["add", "README"]);
        fixture.git(&["commit", "-m", "Initial commit"]);
        fixture.git(&["push", "origin", "master"]);

        fixture
    }

    /// The working tree.
    pub fn work(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    /// Full object name of HEAD.
    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    /// Short object name of HEAD.
    pub fn short_head(&self) -> String {
        self.git(&["rev-parse", "--short", "HEAD"])
    }

    /// Commit a change to a tracked file without pushing.
    pub fn commit(&self, message: &str) {
        let path = self.work().join("CHANGES");
        let mut content = std::fs::read_to_string(&path).unwrap_or_default();
        content.push_str(message);
        content.push('\n');
        std::fs::write(&path, content).unwrap();
        self.git(&["add", "CHANGES"]);
        self.git(&["commit", "-m", message]);
    }

    /// Run git in the working tree, asserting success.
    pub fn git(&self, args: &[&str]) -> String {
        run_git(&self.work(), args)
    }
}

/// Context for `version` at the fixture's HEAD.
pub fn release_context(fixture: &GitFixture, version: &str, config: ReleaseConfig) -> ReleaseContext {
    ReleaseContext::prepare(
        ReleaseVersion::parse(version).unwrap(),
        config,
        &fixture.work(),
        None,
    )
    .unwrap()
}

/// Configuration pointing every remote service at a mock server.
pub fn config_for_server(base_url: &str) -> ReleaseConfig {
    let mut config = ReleaseConfig::default();
    config.store.api_url = format!("{}/api", base_url);
    config.store.dashboard_url = base_url.to_string();
    config.launchpad.api_url = base_url.to_string();
    config
}

fn run_git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
