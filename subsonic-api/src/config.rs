//! Server login persisted to disk.
//!
//! Stored at `<config dir>/subsonic-rs/server.json`:
//!
//! ```json
//! {
//!   "url": "https://music.example.com",
//!   "username": "alice",
//!   "password": "sesame",
//!   "use_salt_auth": true,
//!   "verify_cert": true
//! }
//! ```
//!
//! The password is kept in plain text because token authentication needs
//! it to derive a fresh hash for every request.

use crate::auth::AuthMode;
use crate::error::{Result, SubsonicError};

use serde::{Deserialize, Serialize};

use std::fs;
use std::path::PathBuf;

/// Connection settings for one Subsonic server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL, without the `/rest` suffix.
    pub url: String,
    pub username: String,
    pub password: String,
    /// Send `t`+`s` rather than `p`.
    #[serde(default = "default_true")]
    pub use_salt_auth: bool,
    /// Reject invalid TLS certificates.
    #[serde(default = "default_true")]
    pub verify_cert: bool,
}

fn default_true() -> bool {
    true
}

impl ServerConfig {
    /// New config with token auth and certificate checks on.
    ///
    /// A URL without a scheme is assumed to be `https://`.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: normalize_url(&url.into()),
            username: username.into(),
            password: password.into(),
            use_salt_auth: true,
            verify_cert: true,
        }
    }

    pub fn auth_mode(&self) -> AuthMode {
        AuthMode::from_use_salt(self.use_salt_auth)
    }

    /// Load the saved config. `Ok(None)` if nothing is saved.
    pub fn load() -> Result<Option<Self>> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let mut config: Self = serde_json::from_str(&data)?;
        config.url = normalize_url(&config.url);
        Ok(Some(config))
    }

    /// Like [`load`](Self::load), but a missing config is an error.
    pub fn load_required() -> Result<Self> {
        Self::load()?.ok_or(SubsonicError::NoServerConfigured)
    }

    /// Save to disk, creating parent directories if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(&path, data)?;
        Ok(())
    }

    /// Delete the saved config, if any.
    pub fn clear() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    pub fn path() -> Result<PathBuf> {
        let config = dirs::config_dir()
            .ok_or_else(|| SubsonicError::Other("cannot determine config directory".into()))?;
        Ok(config.join("subsonic-rs").join("server.json"))
    }
}

/// Trim trailing slashes and default the scheme to `https://`.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.contains("://") {
        url.to_owned()
    } else {
        format!("https://{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_defaults_to_https() {
        assert_eq!(normalize_url("music.example.com/"), "https://music.example.com");
        assert_eq!(normalize_url("http://10.0.0.2:4533"), "http://10.0.0.2:4533");
    }

    #[test]
    fn flags_default_to_true() {
        let c: ServerConfig =
            serde_json::from_str(r#"{"url":"https://a","username":"u","password":"p"}"#).unwrap();
        assert!(c.use_salt_auth);
        assert!(c.verify_cert);
        assert_eq!(c.auth_mode(), AuthMode::Token);
    }

    #[test]
    fn plain_auth_when_salt_disabled() {
        let mut c = ServerConfig::new("a.example", "u", "p");
        assert_eq!(c.url, "https://a.example");
        c.use_salt_auth = false;
        assert_eq!(c.auth_mode(), AuthMode::Plain);
    }
}
