//! Anonymous read-only Launchpad web service client.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::types::{
    Archive, BinaryPublication, Collection, Milestone, Processor, SourcePublication,
};
use crate::config::ArchiveRef;

// Guards against a collection whose next link never ends.
const MAX_PAGES: usize = 50;

/// Client for `api.launchpad.net`.
pub struct LaunchpadClient {
    client: Client,
    api_url: String,
}

impl LaunchpadClient {
    /// Create a client with the default 30-second timeout.
    pub fn new(api_url: &str) -> Self {
        Self::with_timeout(api_url, Duration::from_secs(30))
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(api_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("release-status/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// API root URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Web service URL of an archive.
    pub fn archive_url(&self, archive: &ArchiveRef) -> String {
        format!(
            "{}/~{}/+archive/ubuntu/{}",
            self.api_url, archive.owner, archive.name
        )
    }

    /// Web service URL of an Ubuntu series.
    pub fn series_url(&self, series: &str) -> String {
        format!("{}/ubuntu/{}", self.api_url, series)
    }

    /// Look up an archive. `None` when it does not exist.
    pub fn archive(&self, archive: &ArchiveRef) -> Result<Option<Archive>> {
        self.get_optional(&self.archive_url(archive), &[])
    }

    /// Names of the processors an archive builds for.
    pub fn archive_processors(&self, archive: &Archive) -> Result<Vec<String>> {
        let processors: Vec<Processor> =
            self.get_collection(&archive.processors_collection_link, &[])?;
        Ok(processors.into_iter().map(|p| p.name).collect())
    }

    /// Published sources in an archive for one series, optionally filtered by name.
    pub fn published_sources(
        &self,
        archive: &ArchiveRef,
        series: &str,
        source_name: Option<&str>,
    ) -> Result<Vec<SourcePublication>> {
        let series_url = self.series_url(series);
        let mut query = vec![
            ("ws.op", "getPublishedSources"),
            ("status", "Published"),
            ("distro_series", series_url.as_str()),
        ];
        if let Some(name) = source_name {
            query.push(("source_name", name));
            query.push(("exact_match", "true"));
        }
        self.get_collection(&self.archive_url(archive), &query)
    }

    /// Published binaries with an exact name, across all series and architectures.
    pub fn published_binaries(
        &self,
        archive: &ArchiveRef,
        binary_name: &str,
    ) -> Result<Vec<BinaryPublication>> {
        self.get_collection(
            &self.archive_url(archive),
            &[
                ("ws.op", "getPublishedBinaries"),
                ("binary_name", binary_name),
                ("exact_match", "true"),
                ("status", "Published"),
            ],
        )
    }

    /// Look up a project milestone. `None` when it does not exist.
    pub fn milestone(&self, project: &str, name: &str) -> Result<Option<Milestone>> {
        let url = format!("{}/{}/+milestone/{}", self.api_url, project, name);
        self.get_optional(&url, &[])
    }

    fn get_optional<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let url = if query.is_empty() {
            Url::parse(url)
        } else {
            Url::parse_with_params(url, query)
        }
        .with_context(|| format!("Invalid URL {}", url))?;

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        let value = response
            .json()
            .with_context(|| format!("Unexpected response from {}", url))?;
        Ok(Some(value))
    }

    fn get_collection<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut entries = Vec::new();
        let mut page: Option<Collection<T>> = self.get_optional(url, query)?;

        for _ in 0..MAX_PAGES {
            let Some(current) = page.take() else {
                bail!("HTTP 404 Not Found fetching {}", url);
            };
            entries.extend(current.entries);

            match current.next_collection_link {
                // next links already carry the query string
                Some(next) => page = self.get_optional(&next, &[])?,
                None => return Ok(entries),
            }
        }

        bail!("Too many pages fetching {}", url)
    }
}
