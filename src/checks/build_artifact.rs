//! Source tarball check.

use regex::Regex;

use super::{Check, CheckResult};
use crate::context::ReleaseContext;

/// Passes when exactly one orig tarball for this version and revision is in the build directory.
pub struct BuildArtifactPresent<'a> {
    ctx: &'a ReleaseContext,
}

impl<'a> BuildArtifactPresent<'a> {
    pub fn new(ctx: &'a ReleaseContext) -> Self {
        Self { ctx }
    }

    /// `<package>_<archive version>-<n>-g.<rev>.orig.tar.gz`
    fn pattern(&self) -> Regex {
        let pattern = format!(
            r"^{}_{}-\d+-g\.{}\.orig\.tar\.gz$",
            regex::escape(&self.ctx.config.package.name),
            regex::escape(&self.ctx.archive_version),
            regex::escape(&self.ctx.short_rev),
        );
        Regex::new(&pattern).expect("escaped tarball pattern is valid")
    }
}

impl Check for BuildArtifactPresent<'_> {
    fn title(&self) -> String {
        format!("Source tarball for {} is built", self.ctx.version)
    }

    fn evaluate(&self) -> CheckResult {
        let dir = self.ctx.project_path(&self.ctx.config.package.build_dir);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                return CheckResult::fail(format!(
                    "Could not read build directory {}: {}",
                    dir.display(),
                    e
                ))
            }
        };

        let pattern = self.pattern();
        let mut matches: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| pattern.is_match(name))
            .collect();
        matches.sort();

        match matches.as_slice() {
            [_] => CheckResult::pass(),
            [] => CheckResult::fail(format!(
                "No {}_{}-*-g.{}.orig.tar.gz in {}",
                self.ctx.config.package.name,
                self.ctx.archive_version,
                self.ctx.short_rev,
                dir.display()
            )),
            many => CheckResult::fail(format!(
                "More than one matching tarball in {}:\n{}",
                dir.display(),
                many.join("\n")
            )),
        }
    }
}
