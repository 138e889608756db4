//! Configuration file discovery and loading.
//!
//! The tool reads a single optional YAML file. An explicit `--config` path
//! must exist; the default `.release-status.yml` in the project root may be
//! absent, in which case the built-in defaults apply.

use crate::config::schema::ReleaseConfig;
use crate::config::validator::validate;
use crate::error::{ReleaseError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".release-status.yml";

/// Default config location for a project.
pub fn default_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Load a single config file and parse it into ReleaseConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ReleaseConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReleaseError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ReleaseError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into ReleaseConfig.
///
/// Empty content yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ReleaseConfig> {
    if content.trim().is_empty() {
        return Ok(ReleaseConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ReleaseError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and validate the configuration for a project.
///
/// `explicit` is the `--config` override, which must exist.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<ReleaseConfig> {
    let config = match explicit {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(path)?
        }
        None => {
            let path = default_config_path(project_root);
            if path.exists() {
                tracing::debug!("Loading config from {}", path.display());
                load_config_file(&path)?
            } else {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                ReleaseConfig::default()
            }
        }
    };

    validate(&config)?;
    Ok(config)
}
