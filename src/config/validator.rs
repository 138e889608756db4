//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - At least one architecture must be listed
//! - Archive templates must be `owner/name` and only use `{major}`
//! - Names and API URLs must not be empty

use crate::config::schema::{ArchiveStage, ReleaseConfig};
use crate::error::{ReleaseError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &ReleaseConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_archives(config));
    errors.extend(validate_required(config));

    errors
}

/// Validate and return a single error if invalid.
pub fn validate(config: &ReleaseConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(ReleaseError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

fn validate_archives(config: &ReleaseConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.archives.architectures.is_empty() {
        errors.push(ValidationError::new(
            "no-architectures",
            "archives.architectures must list at least one architecture",
        ));
    }

    for stage in [
        ArchiveStage::ReleasePreparation,
        ArchiveStage::Candidate,
        ArchiveStage::Stable,
    ] {
        let template = config.archives.template(stage);

        match template.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {}
            _ => errors.push(ValidationError::new(
                "archive-format",
                format!(
                    "{} archive '{}' must have the form owner/name",
                    stage, template
                ),
            )),
        }

        let leftover = template.replace("{major}", "");
        if leftover.contains('{') || leftover.contains('}') {
            errors.push(ValidationError::new(
                "archive-placeholder",
                format!(
                    "{} archive '{}' uses an unknown placeholder (only {{major}} is supported)",
                    stage, template
                ),
            ));
        }
    }

    errors
}

fn validate_required(config: &ReleaseConfig) -> Vec<ValidationError> {
    let fields = [
        ("package.name", &config.package.name),
        ("archives.series", &config.archives.series),
        ("git.remote", &config.git.remote),
        ("git.dev_branch", &config.git.dev_branch),
        ("store.snap", &config.store.snap),
        ("store.api_url", &config.store.api_url),
        ("store.dashboard_url", &config.store.dashboard_url),
        ("launchpad.api_url", &config.launchpad.api_url),
        ("launchpad.project", &config.launchpad.project),
    ];

    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| ValidationError::new("empty-field", format!("{} must not be empty", name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&ReleaseConfig::default()).is_ok());
    }

    #[test]
    fn empty_architectures_rejected() {
        let mut config = ReleaseConfig::default();
        config.archives.architectures.clear();

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "no-architectures");
    }

    #[test]
    fn archive_without_owner_rejected() {
        let mut config = ReleaseConfig::default();
        config.archives.stable = "{major}".to_string();

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "archive-format"));
    }

    #[test]
    fn unknown_placeholder_rejected() {
        let mut config = ReleaseConfig::default();
        config.archives.candidate = "maas/{series}-next".to_string();

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "archive-placeholder"));
    }

    #[test]
    fn empty_fields_reported_together() {
        let mut config = ReleaseConfig::default();
        config.package.name = String::new();
        config.store.snap = "  ".to_string();

        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("package.name"));
        assert!(err.contains("store.snap"));
    }
}
