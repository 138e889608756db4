//! Version control queries.

pub mod git;

pub use git::Git;
