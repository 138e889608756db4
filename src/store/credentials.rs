//! Snap store credential loading.
//!
//! Credentials come from the snapcraft login file: an INI document with a
//! `[login.ubuntu.com]` section holding a root `macaroon` and an
//! `unbound_discharge`. Loading binds the discharge and produces the
//! `Authorization` header used for every authenticated store request.

use std::path::{Path, PathBuf};

use super::macaroon::{authorization_header, Macaroon};
use crate::config::IniFile;
use crate::error::{ReleaseError, Result};

/// INI section holding the store login.
pub const LOGIN_SECTION: &str = "login.ubuntu.com";

/// How to obtain fresh credentials.
pub const LOGIN_HINT: &str =
    "Run `snapcraft login` to log in to the snap store, then run this command again.";

/// Default location of the snapcraft login file.
pub fn default_credentials_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("snapcraft").join("snapcraft.cfg"))
}

/// Header used to authenticate store requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAuth {
    pub header_name: String,
    pub header_value: String,
}

impl StoreAuth {
    /// Build from an already-bound macaroon pair.
    pub fn macaroon(root: &str, bound_discharge: &str) -> Self {
        Self {
            header_name: "Authorization".to_string(),
            header_value: authorization_header(root, bound_discharge),
        }
    }
}

/// Root and unbound discharge macaroons, as stored on disk.
#[derive(Debug, Clone)]
pub struct StoreCredentials {
    root: String,
    unbound_discharge: String,
}

impl StoreCredentials {
    /// Load credentials from a snapcraft login file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReleaseError::CredentialsNotFound {
                path: path.to_path_buf(),
                hint: LOGIN_HINT.to_string(),
            });
        }

        let ini = IniFile::load(path).map_err(|e| incomplete(path, e.to_string()))?;
        Self::from_ini(&ini, path)
    }

    /// Extract credentials from a parsed login file.
    pub fn from_ini(ini: &IniFile, path: &Path) -> Result<Self> {
        if !ini.has_section(LOGIN_SECTION) {
            return Err(incomplete(
                path,
                format!("missing [{}] section", LOGIN_SECTION),
            ));
        }

        let field = |key: &str| -> Result<String> {
            ini.get(LOGIN_SECTION, key)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(String::from)
                .ok_or_else(|| incomplete(path, format!("missing '{}'", key)))
        };

        Ok(Self {
            root: field("macaroon")?,
            unbound_discharge: field("unbound_discharge")?,
        })
    }

    /// Bind the discharge to the root and build the request header.
    pub fn authorization(&self) -> Result<StoreAuth> {
        let root = Macaroon::deserialize(&self.root)?;
        let discharge = Macaroon::deserialize(&self.unbound_discharge)?;
        let bound = root.prepare_for_request(&discharge);

        tracing::debug!("Bound discharge macaroon for {}", root.location());
        Ok(StoreAuth::macaroon(&self.root, &bound.serialize()?))
    }
}

fn incomplete(path: &Path, message: String) -> ReleaseError {
    ReleaseError::CredentialsIncomplete {
        path: path.to_path_buf(),
        message,
        hint: LOGIN_HINT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn macaroons() -> (String, String) {
        let root = Macaroon::new("dashboard.snapcraft.io", b"root", b"k1")
            .with_first_party_caveat("package_id = maas");
        let discharge = Macaroon::new("login.ubuntu.com", b"discharge", b"k2");
        (root.serialize().unwrap(), discharge.serialize().unwrap())
    }

    fn write_login(temp: &TempDir, content: &str) -> PathBuf {
        let path = temp.path().join("snapcraft.cfg");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = StoreCredentials::load(&temp.path().join("snapcraft.cfg")).unwrap_err();

        assert!(matches!(err, ReleaseError::CredentialsNotFound { .. }));
        assert!(err.to_string().contains("snapcraft login"));
    }

    #[test]
    fn missing_section_is_incomplete() {
        let temp = TempDir::new().unwrap();
        let path = write_login(&temp, "[other]\nmacaroon = x\n");
        let err = StoreCredentials::load(&path).unwrap_err();

        assert!(matches!(err, ReleaseError::CredentialsIncomplete { .. }));
        assert!(err.to_string().contains("[login.ubuntu.com]"));
    }

    #[test]
    fn missing_discharge_is_incomplete() {
        let temp = TempDir::new().unwrap();
        let (root, _) = macaroons();
        let path = write_login(&temp, &format!("[login.ubuntu.com]\nmacaroon = {}\n", root));
        let err = StoreCredentials::load(&path).unwrap_err();

        assert!(err.to_string().contains("unbound_discharge"));
        assert!(err.to_string().contains("snapcraft login"));
    }

    #[test]
    fn loads_and_binds() {
        let temp = TempDir::new().unwrap();
        let (root, discharge) = macaroons();
        let path = write_login(
            &temp,
            &format!(
                "[login.ubuntu.com]\nmacaroon = {}\nunbound_discharge = {}\nemail = me@example.com\n",
                root, discharge
            ),
        );

        let auth = StoreCredentials::load(&path)
            .unwrap()
            .authorization()
            .unwrap();

        assert_eq!(auth.header_name, "Authorization");
        assert!(auth
            .header_value
            .starts_with(&format!("Macaroon root=\"{}\", discharge=\"", root)));
        // bound discharge differs from the unbound one
        assert!(!auth.header_value.contains(&format!("\"{}\"", discharge)));
    }

    #[test]
    fn malformed_macaroon_fails_authorization() {
        let temp = TempDir::new().unwrap();
        let path = write_login(
            &temp,
            "[login.ubuntu.com]\nmacaroon = not-a-macaroon\nunbound_discharge = nope\n",
        );

        let err = StoreCredentials::load(&path)
            .unwrap()
            .authorization()
            .unwrap_err();
        assert!(matches!(err, ReleaseError::MalformedMacaroon { .. }));
    }

    #[test]
    fn default_path_ends_with_snapcraft_cfg() {
        if let Some(path) = default_credentials_path() {
            assert!(path.ends_with("snapcraft/snapcraft.cfg"));
        }
    }
}
