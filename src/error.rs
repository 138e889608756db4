//! Error types for release-status.
//!
//! This module defines [`ReleaseError`], the fatal error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - `ReleaseError` is reserved for problems with the setup itself (missing
//!   credentials, bad configuration, unrecognized version grades). These
//!   abort the run before any check executes.
//! - Release-readiness gaps are never errors: checks report them as failed
//!   [`CheckResult`](crate::checks::CheckResult)s.
//! - Client plumbing uses `anyhow::Error`; checks translate those into
//!   failed results, and anything that still escapes lands in
//!   `ReleaseError::Other`.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for release-status.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The version string does not match the accepted release pattern.
    #[error("Invalid release version '{version}': expected MAJOR.MINOR.MICRO with an optional a/b/rc qualifier")]
    InvalidVersion { version: String },

    /// The version has a `-` separator with nothing after it.
    #[error("Missing grade suffix in version '{version}'")]
    MissingGradeSuffix { version: String },

    /// The version qualifier is not one of the supported release grades.
    #[error("Unknown grade '{grade}' in version '{version}' (expected beta or rc)")]
    UnknownGrade { version: String, grade: String },

    /// The store credential file does not exist.
    #[error("Store credentials not found at {path}\n{hint}")]
    CredentialsNotFound { path: PathBuf, hint: String },

    /// The credential file exists but lacks the login section or one of its keys.
    #[error("Store credentials at {path} are incomplete: {message}\n{hint}")]
    CredentialsIncomplete {
        path: PathBuf,
        message: String,
        hint: String,
    },

    /// A macaroon could not be decoded.
    #[error("Malformed macaroon: {message}")]
    MalformedMacaroon { message: String },

    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A git command failed while preparing the release context.
    #[error("git {command} failed: {stderr}")]
    GitFailed { command: String, stderr: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for release-status operations.
pub type Result<T> = std::result::Result<T, ReleaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_version_displays_version() {
        let err = ReleaseError::InvalidVersion {
            version: "3.1".into(),
        };
        assert!(err.to_string().contains("'3.1'"));
    }

    #[test]
    fn unknown_grade_displays_grade_and_version() {
        let err = ReleaseError::UnknownGrade {
            version: "3.1.0-alpha1".into(),
            grade: "alpha1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("alpha1"));
        assert!(msg.contains("3.1.0-alpha1"));
    }

    #[test]
    fn credentials_not_found_displays_path_and_hint() {
        let err = ReleaseError::CredentialsNotFound {
            path: PathBuf::from("/home/me/.config/snapcraft/snapcraft.cfg"),
            hint: "Run `snapcraft login`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("snapcraft.cfg"));
        assert!(msg.contains("snapcraft login"));
    }

    #[test]
    fn git_failed_displays_command_and_stderr() {
        let err = ReleaseError::GitFailed {
            command: "rev-parse --short HEAD".into(),
            stderr: "not a git repository".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("rev-parse"));
        assert!(msg.contains("not a git repository"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ReleaseError = io_err.into();
        assert!(matches!(err, ReleaseError::Io(_)));
    }

    #[test]
    fn anyhow_error_is_transparent() {
        let err: ReleaseError = anyhow::anyhow!("connection refused").into();
        assert_eq!(err.to_string(), "connection refused");
    }
}
