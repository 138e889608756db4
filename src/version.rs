//! Release version parsing and derived names.
//!
//! A release version is written either in Python notation (`3.1.0b3`,
//! `3.1.0rc1`) or in dashed notation (`3.1.0-beta3`, `3.1.0-rc1`). Both are
//! normalised to the dashed form, which doubles as the git tag and the
//! milestone name. Everything else (major version, grade, channel, archive
//! and Python spellings, release branch) is derived from that string.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ReleaseError, Result};

/// Branch that pre-release (alpha/beta) versions are cut from.
pub const DEFAULT_DEV_BRANCH: &str = "master";

static PYTHON_NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\.\d+\.\d+)(?:(a|b|rc)(\d+))?$").expect("valid version regex")
});

static DASHED_NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\.\d+\.\d+)(?:-(alpha|beta|rc)(\d+))?$").expect("valid version regex")
});

/// Pre-release qualifier of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    /// No qualifier.
    Final,
    /// Release candidate (`-rcN`).
    Rc,
    /// Beta (`-betaN`).
    Beta,
}

impl Grade {
    /// Channel risk level that releases of this grade are published to.
    pub fn risk(self) -> &'static str {
        match self {
            Self::Final => "stable",
            Self::Rc => "candidate",
            Self::Beta => "beta",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Final => write!(f, "final"),
            Self::Rc => write!(f, "rc"),
            Self::Beta => write!(f, "beta"),
        }
    }
}

/// A validated release version in dashed notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Parse a version in either accepted notation.
    ///
    /// ```
    /// use release_status::version::ReleaseVersion;
    ///
    /// let v = ReleaseVersion::parse("3.1.0b3").unwrap();
    /// assert_eq!(v.as_str(), "3.1.0-beta3");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if DASHED_NOTATION.is_match(input) {
            return Ok(Self(input.to_string()));
        }

        if let Some(caps) = PYTHON_NOTATION.captures(input) {
            let base = &caps[1];
            let canonical = match (caps.get(2), caps.get(3)) {
                (Some(qualifier), Some(num)) => {
                    let long = match qualifier.as_str() {
                        "a" => "alpha",
                        "b" => "beta",
                        _ => "rc",
                    };
                    format!("{}-{}{}", base, long, num.as_str())
                }
                _ => base.to_string(),
            };
            return Ok(Self(canonical));
        }

        Err(ReleaseError::InvalidVersion {
            version: input.to_string(),
        })
    }

    /// The canonical dashed string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First two components, e.g. `3.1`.
    pub fn major(&self) -> String {
        derive_major_version(&self.0)
    }

    /// Release grade; fails for qualifiers other than beta/rc.
    pub fn grade(&self) -> Result<Grade> {
        derive_grade(&self.0)
    }

    /// Spelling used by Debian packages and snap versions (`3.1.0~beta3`).
    pub fn archive(&self) -> String {
        archive_version(&self.0)
    }

    /// Spelling used in Python project metadata (`3.1.0b3`).
    pub fn python(&self) -> String {
        python_version(&self.0)
    }
}

impl FromStr for ReleaseVersion {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Truncate a version to its first two dot-separated components.
pub fn derive_major_version(version: &str) -> String {
    version.split('.').take(2).collect::<Vec<_>>().join(".")
}

/// Determine the release grade of a version.
pub fn derive_grade(version: &str) -> Result<Grade> {
    let Some((_, suffix)) = version.split_once('-') else {
        return Ok(Grade::Final);
    };

    if suffix.is_empty() {
        Err(ReleaseError::MissingGradeSuffix {
            version: version.to_string(),
        })
    } else if suffix.starts_with("beta") {
        Ok(Grade::Beta)
    } else if suffix.starts_with("rc") {
        Ok(Grade::Rc)
    } else {
        Err(ReleaseError::UnknownGrade {
            version: version.to_string(),
            grade: suffix.to_string(),
        })
    }
}

/// Channel name for a major version and grade, e.g. `3.1/candidate`.
pub fn derive_channel(major: &str, grade: Grade) -> String {
    format!("{}/{}", major, grade.risk())
}

/// Channel name for a full version string.
pub fn channel_for(version: &str) -> Result<String> {
    let grade = derive_grade(version)?;
    Ok(derive_channel(&derive_major_version(version), grade))
}

/// Replace the pre-release separator with `~` so it sorts before the final release.
pub fn archive_version(version: &str) -> String {
    version.replacen('-', "~", 1)
}

/// Python (PEP 440) spelling of a dashed version.
pub fn python_version(version: &str) -> String {
    version
        .replacen("-alpha", "a", 1)
        .replacen("-beta", "b", 1)
        .replacen("-rc", "rc", 1)
}

/// Whether the version is cut from the development line.
pub fn is_development_release(version: &str) -> bool {
    version.contains("-alpha") || version.contains("-beta")
}

/// Branch the release commit must live on.
pub fn release_branch(version: &str, dev_branch: &str) -> String {
    if is_development_release(version) {
        dev_branch.to_string()
    } else {
        derive_major_version(version)
    }
}
