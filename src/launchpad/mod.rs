//! Launchpad access: archives, publications and milestones.

pub mod client;
pub mod types;

pub use client::LaunchpadClient;
pub use types::{Archive, BinaryPublication, Milestone, Processor, SourcePublication};
