//! Snap store HTTP client.
//!
//! Three endpoints are used:
//! - the dashboard track endpoint, to confirm a track exists
//! - the public `snaps/info` endpoint, to resolve a snap name to its id
//! - the dashboard revision history, to find uploaded builds

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use thiserror::Error;

use super::credentials::{StoreAuth, LOGIN_HINT};

/// Most revisions the history endpoint returns.
pub const HISTORY_LIMIT: usize = 500;

/// Failure talking to the store, with remediation where one is known.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store credentials need to be refreshed. {}", LOGIN_HINT)]
    NeedsRefresh,

    #[error("Store credentials lack the required permission ({code}). {}", LOGIN_HINT)]
    PermissionRequired { code: String },

    #[error("Store returned HTTP {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Store returned HTTP {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// One uploaded snap revision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnapRevision {
    pub revision: u64,
    pub version: String,
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub channels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorList {
    #[serde(default)]
    error_list: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct SnapInfo {
    #[serde(rename = "snap-id")]
    snap_id: String,
}

/// Client for the snap store APIs.
pub struct SnapStoreClient {
    client: Client,
    api_url: String,
    dashboard_url: String,
    auth: Option<StoreAuth>,
}

impl SnapStoreClient {
    /// Create a client with the default 30-second timeout.
    pub fn new(api_url: &str, dashboard_url: &str, auth: Option<StoreAuth>) -> Self {
        Self::with_timeout(api_url, dashboard_url, auth, Duration::from_secs(30))
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(
        api_url: &str,
        dashboard_url: &str,
        auth: Option<StoreAuth>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("release-status/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_url: api_url.trim_end_matches('/').to_string(),
            dashboard_url: dashboard_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    /// Succeeds when `track` exists for `snap`.
    pub fn track_exists(&self, snap: &str, track: &str) -> Result<(), StoreError> {
        let url = format!(
            "{}/api/v2/snaps/{}/tracks/{}",
            self.dashboard_url, snap, track
        );
        self.send(self.authorized(self.client.get(&url)), &url)?;
        Ok(())
    }

    /// Resolve a snap name to its store id.
    pub fn snap_id(&self, snap: &str) -> Result<String, StoreError> {
        let url = format!("{}/v2/snaps/info/{}", self.api_url, snap);
        let request = self.client.get(&url).header("Snap-Device-Series", "16");
        let info: SnapInfo = decode(self.send(request, &url)?, &url)?;
        Ok(info.snap_id)
    }

    /// Recent revisions of a snap, newest first.
    pub fn revision_history(&self, snap_id: &str) -> Result<Vec<SnapRevision>, StoreError> {
        let url = format!("{}/dev/api/snaps/{}/history", self.dashboard_url, snap_id);
        let mut revisions: Vec<SnapRevision> =
            decode(self.send(self.authorized(self.client.get(&url)), &url)?, &url)?;
        revisions.truncate(HISTORY_LIMIT);
        Ok(revisions)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(auth) => request.header(&auth.header_name, &auth.header_value),
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, StoreError> {
        tracing::debug!("GET {}", url);
        let response = request.send().map_err(|e| StoreError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let needs_refresh = response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("needs_refresh=1"));
        let body = response.text().unwrap_or_default();

        if needs_refresh {
            return Err(StoreError::NeedsRefresh);
        }
        Err(error_from_body(status, url, &body))
    }
}

const PERMISSION_CODES: &[&str] = &[
    "macaroon-permission-required",
    "macaroon-authorization-required",
];

/// Map a store error response to a [`StoreError`].
///
/// Any entry asking for a refresh wins over permission errors, which win
/// over whatever the first entry says.
pub(crate) fn error_from_body(status: u16, url: &str, body: &str) -> StoreError {
    let entries = serde_json::from_str::<ErrorList>(body)
        .map(|list| list.error_list)
        .unwrap_or_default();

    if entries.iter().any(|e| e.code == "macaroon-needs-refresh") {
        return StoreError::NeedsRefresh;
    }
    if let Some(entry) = entries
        .iter()
        .find(|e| PERMISSION_CODES.contains(&e.code.as_str()))
    {
        return StoreError::PermissionRequired {
            code: entry.code.clone(),
        };
    }

    match entries.into_iter().next() {
        Some(entry) => StoreError::Api {
            status,
            code: entry.code,
            message: entry.message,
        },
        None => StoreError::Http {
            status,
            url: url.to_string(),
        },
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: Response, url: &str) -> Result<T, StoreError> {
    response.json().map_err(|e| StoreError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
