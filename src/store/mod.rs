//! Snap store access: credentials, macaroon binding and the HTTP client.

pub mod client;
pub mod credentials;
pub mod macaroon;

pub use client::{SnapRevision, SnapStoreClient, StoreError, HISTORY_LIMIT};
pub use credentials::{default_credentials_path, StoreAuth, StoreCredentials, LOGIN_HINT};
pub use macaroon::Macaroon;
