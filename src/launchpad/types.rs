//! Launchpad API resource types.

use serde::Deserialize;

/// A package archive (PPA).
#[derive(Debug, Clone, Deserialize)]
pub struct Archive {
    pub processors_collection_link: String,
}

/// A build processor enabled for an archive.
#[derive(Debug, Clone, Deserialize)]
pub struct Processor {
    pub name: String,
}

/// A published source package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourcePublication {
    pub source_package_name: String,
    pub source_package_version: String,
}

/// A published binary package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BinaryPublication {
    pub binary_package_name: String,
    pub binary_package_version: String,
    pub distro_arch_series_link: String,
}

impl BinaryPublication {
    /// Architecture tag: the last segment of the distro arch series link.
    pub fn arch(&self) -> &str {
        self.distro_arch_series_link
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }

    /// Series name: the segment before the architecture.
    pub fn series(&self) -> &str {
        self.distro_arch_series_link
            .trim_end_matches('/')
            .rsplit('/')
            .nth(1)
            .unwrap_or_default()
    }
}

/// A project milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct Milestone {
    pub name: String,
}

/// One page of a Launchpad collection.
#[derive(Debug, Deserialize)]
pub(crate) struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub entries: Vec<T>,
    #[serde(default)]
    pub next_collection_link: Option<String>,
}
