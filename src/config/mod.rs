//! Configuration loading, parsing, and validation.
//!
//! This module handles:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - The INI reader used for credential and metadata files in [`ini`]
//!
//! # Example
//!
//! ```
//! use release_status::config::{load_config, ArchiveStage};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".release-status.yml"), "archives:\n  series: noble\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.archives.series, "noble");
//! assert_eq!(
//!     config.archives.archive_for(ArchiveStage::Stable, "3.1").to_string(),
//!     "ppa:maas/3.1"
//! );
//! ```

pub mod ini;
pub mod loader;
pub mod schema;
pub mod validator;

pub use ini::IniFile;
pub use loader::{default_config_path, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{
    ArchiveConfig, ArchiveRef, ArchiveStage, GitConfig, LaunchpadConfig, PackageConfig,
    ReleaseConfig, StoreConfig, DEFAULT_ARCHITECTURES,
};
pub use validator::{validate, validate_config, ValidationError};
