// crates/portal-client/src/config/file.rs
// File-based configuration from ~/.portal/config.toml

use super::BackendFlavor;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// `~/.portal/config.toml`; every section and key is optional
#[derive(Debug, Deserialize, Default)]
pub struct PortalConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub haiku: HaikuSection,
    #[serde(default)]
    pub auth: AuthSection,
}

#[derive(Debug, Deserialize, Default)]
pub struct ApiSection {
    pub base_url: Option<String>,
    /// "python" or "aws"
    pub backend: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct HaikuSection {
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AuthSection {
    pub token: Option<String>,
}

impl PortalConfig {
    /// Load config from ~/.portal/config.toml
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path; missing or malformed files yield defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "config file loaded");
                    config
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "config file is not valid TOML, using defaults"
                    );
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "no config file");
                Self::default()
            }
        }
    }

    /// ~/.portal, falling back to the working directory without a home
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".portal")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn dotenv_path() -> PathBuf {
        Self::config_dir().join(".env")
    }

    pub fn backend(&self) -> Option<BackendFlavor> {
        let raw = self.api.backend.as_deref()?;
        match raw.parse() {
            Ok(flavor) => Some(flavor),
            Err(_) => {
                warn!(value = raw, "Unknown [api] backend in config file, ignoring");
                None
            }
        }
    }
}
