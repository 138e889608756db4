//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the
//! `.release-status.yml` file. Every field has a default, so an empty or
//! missing file describes the stock MAAS release layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Architectures every release must be built for.
pub const DEFAULT_ARCHITECTURES: [&str; 4] = ["amd64", "arm64", "ppc64el", "s390x"];

/// Root configuration structure for `.release-status.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Source package and local file layout
    pub package: PackageConfig,

    /// Git remote and branch naming
    pub git: GitConfig,

    /// Launchpad archives (PPAs)
    pub archives: ArchiveConfig,

    /// Snap store settings
    pub store: StoreConfig,

    /// Launchpad API settings
    pub launchpad: LaunchpadConfig,
}

/// Source package naming and the local files that carry its version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Source package name (also the tarball prefix)
    pub name: String,

    /// Python project metadata with a `[metadata] version` entry
    pub metadata_file: PathBuf,

    /// Debian changelog
    pub changelog: PathBuf,

    /// Directory the source tarball is built into
    pub build_dir: PathBuf,

    /// Debian epoch prefixed to package versions
    pub epoch: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: "maas".to_string(),
            metadata_file: PathBuf::from("setup.cfg"),
            changelog: PathBuf::from("debian/changelog"),
            build_dir: PathBuf::from("build_pkg"),
            epoch: "1".to_string(),
        }
    }
}

/// Git naming conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Canonical remote that release branches and tags are pushed to
    pub remote: String,

    /// Branch alpha/beta releases are cut from
    pub dev_branch: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            dev_branch: crate::version::DEFAULT_DEV_BRANCH.to_string(),
        }
    }
}

/// Release stage an archive belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveStage {
    /// Where release builds are first uploaded.
    ReleasePreparation,
    /// Pre-release packages for testers.
    Candidate,
    /// Final packages for users.
    Stable,
}

impl fmt::Display for ArchiveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReleasePreparation => write!(f, "release-preparation"),
            Self::Candidate => write!(f, "candidate"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Owner and name of a Launchpad archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveRef {
    /// Owning person or team
    pub owner: String,
    /// Archive name
    pub name: String,
}

impl fmt::Display for ArchiveRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ppa:{}/{}", self.owner, self.name)
    }
}

/// Launchpad archive layout.
///
/// Stage entries are `owner/name` templates; `{major}` is replaced with the
/// major version of the release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Ubuntu series packages are published for
    pub series: String,

    /// Architectures every archive must build and publish
    pub architectures: Vec<String>,

    /// Archive release builds are uploaded to
    pub release_preparation: String,

    /// Archive pre-release packages are copied to
    pub candidate: String,

    /// Archive final packages are copied to
    pub stable: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            series: "jammy".to_string(),
            architectures: DEFAULT_ARCHITECTURES.iter().map(|s| s.to_string()).collect(),
            release_preparation: "maas-committers/release-preparation".to_string(),
            candidate: "maas/{major}-next".to_string(),
            stable: "maas/{major}".to_string(),
        }
    }
}

impl ArchiveConfig {
    /// The raw template for a stage.
    pub fn template(&self, stage: ArchiveStage) -> &str {
        match stage {
            ArchiveStage::ReleasePreparation => &self.release_preparation,
            ArchiveStage::Candidate => &self.candidate,
            ArchiveStage::Stable => &self.stable,
        }
    }

    /// Resolve the archive for a stage and major version.
    ///
    /// Templates are checked by the validator, so a malformed template here
    /// falls back to using the whole string as the archive name.
    pub fn archive_for(&self, stage: ArchiveStage, major: &str) -> ArchiveRef {
        let expanded = self.template(stage).replace("{major}", major);
        match expanded.split_once('/') {
            Some((owner, name)) => ArchiveRef {
                owner: owner.to_string(),
                name: name.to_string(),
            },
            None => ArchiveRef {
                owner: String::new(),
                name: expanded,
            },
        }
    }
}

/// Snap store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Snap name
    pub snap: String,

    /// Public store API (snap info lookups)
    pub api_url: String,

    /// Publisher dashboard API (tracks, revision history)
    pub dashboard_url: String,

    /// Credential file; defaults to the snapcraft config location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snap: "maas".to_string(),
            api_url: "https://api.snapcraft.io".to_string(),
            dashboard_url: "https://dashboard.snapcraft.io".to_string(),
            credentials: None,
        }
    }
}

/// Launchpad API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchpadConfig {
    /// REST API root
    pub api_url: String,

    /// Project that owns the release milestones
    pub project: String,
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.launchpad.net/devel".to_string(),
            project: "maas".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config: ReleaseConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ReleaseConfig::default());
        assert_eq!(config.package.name, "maas");
        assert_eq!(config.archives.architectures.len(), 4);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = r#"
package:
  name: widget
archives:
  series: noble
"#;
        let config: ReleaseConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.package.name, "widget");
        assert_eq!(config.package.epoch, "1");
        assert_eq!(config.archives.series, "noble");
        assert_eq!(config.archives.stable, "maas/{major}");
        assert_eq!(config.git.remote, "origin");
    }

    #[test]
    fn archive_for_expands_major() {
        let archives = ArchiveConfig::default();
        let candidate = archives.archive_for(ArchiveStage::Candidate, "3.1");
        assert_eq!(candidate.owner, "maas");
        assert_eq!(candidate.name, "3.1-next");
        assert_eq!(candidate.to_string(), "ppa:maas/3.1-next");

        let prep = archives.archive_for(ArchiveStage::ReleasePreparation, "3.1");
        assert_eq!(prep.owner, "maas-committers");
        assert_eq!(prep.name, "release-preparation");
    }

    #[test]
    fn stage_display_names() {
        assert_eq!(
            ArchiveStage::ReleasePreparation.to_string(),
            "release-preparation"
        );
        assert_eq!(ArchiveStage::Candidate.to_string(), "candidate");
        assert_eq!(ArchiveStage::Stable.to_string(), "stable");
    }
}
