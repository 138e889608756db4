//! release-status - Release readiness checklist.
//!
//! Given a version about to be released, release-status asks git, the
//! local tree, the snap store and Launchpad whether every step of the
//! release has happened: the commit is pushed to the right branch, version
//! strings agree, packages are built, published and copied, the snap is
//! uploaded and released to its channel, the milestone exists and the tag is
//! pushed. It never changes anything.
//!
//! # Modules
//!
//! - [`checks`] - The checklist and its runner
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`context`] - Release parameters shared by every check
//! - [`error`] - Error types and result aliases
//! - [`launchpad`] - Launchpad REST client
//! - [`store`] - Snap store client and credentials
//! - [`ui`] - Spinners and terminal output
//! - [`vcs`] - Git queries
//! - [`version`] - Release version parsing and derived names
//!
//! # Example
//!
//! ```
//! use release_status::version::{derive_channel, ReleaseVersion};
//!
//! let version = ReleaseVersion::parse("3.1.0rc1").unwrap();
//! assert_eq!(version.as_str(), "3.1.0-rc1");
//! assert_eq!(derive_channel(&version.major(), version.grade().unwrap()), "3.1/candidate");
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod launchpad;
pub mod store;
pub mod ui;
pub mod vcs;
pub mod version;

#[cfg(test)]
mod test_support;

pub use error::{ReleaseError, Result};
