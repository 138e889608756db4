//! Read-only queries against the local git repository.
//!
//! All operations shell out to the system `git`. Nothing here mutates the
//! repository, its refs or its remotes.

use crate::error::{ReleaseError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Handle to a git working tree.
#[derive(Debug, Clone)]
pub struct Git {
    repo_path: PathBuf,
}

impl Git {
    /// Create a handle for the repository at `repo_path`.
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// The working tree path.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Abbreviated object name of a revision.
    pub fn short_rev(&self, rev: &str) -> Result<String> {
        self.run(&["rev-parse", "--short", rev])
    }

    /// Whether tracked files differ from HEAD (staged or not).
    pub fn has_uncommitted_changes(&self) -> Result<bool> {
        let status = self.run(&["status", "--porcelain", "--untracked-files=no"])?;
        Ok(!status.is_empty())
    }

    /// Remote-tracking branches (`origin/master`, ...) that contain `rev`.
    pub fn remote_branches_containing(&self, rev: &str) -> Result<Vec<String>> {
        let output = self.run(&[
            "branch",
            "--remotes",
            "--contains",
            rev,
            "--format=%(refname)",
        ])?;

        Ok(output
            .lines()
            .filter_map(|line| line.trim().strip_prefix("refs/remotes/"))
            .filter(|name| !name.ends_with("/HEAD"))
            .map(String::from)
            .collect())
    }

    /// Whether `remote` advertises `refs/tags/<tag>`.
    pub fn remote_has_tag(&self, remote: &str, tag: &str) -> Result<bool> {
        let refname = format!("refs/tags/{}", tag);
        let output = self.run(&["ls-remote", "--tags", remote, &refname])?;
        Ok(output
            .lines()
            .filter_map(|line| line.split_whitespace().nth(1))
            .any(|name| name == refname))
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()?;

        if !output.status.success() {
            return Err(ReleaseError::GitFailed {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
