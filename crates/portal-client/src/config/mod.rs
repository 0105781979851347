// crates/portal-client/src/config/mod.rs
// Configuration: CLI flags > environment > ~/.portal/config.toml > defaults

pub mod env;
pub mod file;

pub use env::{ConfigValidation, EnvConfig};
pub use file::PortalConfig;

use crate::auth::token_source;
use crate::client::ResourceClient;
use crate::error::PortalError;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_HAIKU_URL: &str = "http://localhost:8000";

/// Which portal backend deployment is on the other end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendFlavor {
    #[default]
    Python,
    Aws,
}

impl BackendFlavor {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendFlavor::Python => "python",
            BackendFlavor::Aws => "aws",
        }
    }

    /// Whether this deployment sits behind the identity provider
    pub fn expects_token(self) -> bool {
        matches!(self, BackendFlavor::Aws)
    }
}

impl fmt::Display for BackendFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendFlavor {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" | "local" => Ok(BackendFlavor::Python),
            "aws" | "cloud" => Ok(BackendFlavor::Aws),
            other => Err(PortalError::Config(format!(
                "unknown backend '{other}'. Valid options: python, aws"
            ))),
        }
    }
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub haiku_url: Option<String>,
    pub token: Option<String>,
    pub backend: Option<BackendFlavor>,
}

/// Fully resolved settings the client is built from
#[derive(Clone)]
pub struct Settings {
    pub api_url: String,
    pub haiku_url: String,
    pub token: Option<String>,
    pub backend: BackendFlavor,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_url", &self.api_url)
            .field("haiku_url", &self.haiku_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("backend", &self.backend)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            haiku_url: DEFAULT_HAIKU_URL.to_string(),
            token: None,
            backend: BackendFlavor::default(),
        }
    }
}

impl Settings {
    pub fn resolve(cli: &Overrides, env: &EnvConfig, file: &PortalConfig) -> Self {
        let defaults = Self::default();
        Self {
            api_url: non_blank(&cli.api_url)
                .or_else(|| non_blank(&env.api_url))
                .or_else(|| non_blank(&file.api.base_url))
                .unwrap_or(defaults.api_url),
            haiku_url: non_blank(&cli.haiku_url)
                .or_else(|| non_blank(&env.haiku_url))
                .or_else(|| non_blank(&file.haiku.base_url))
                .unwrap_or(defaults.haiku_url),
            token: non_blank(&cli.token)
                .or_else(|| non_blank(&env.token))
                .or_else(|| non_blank(&file.auth.token)),
            backend: cli
                .backend
                .or(env.backend)
                .or_else(|| file.backend())
                .unwrap_or(defaults.backend),
        }
    }

    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();
        check_url(&mut validation, "API URL", &self.api_url);
        check_url(&mut validation, "haiku URL", &self.haiku_url);
        if self.backend.expects_token() && self.token.is_none() {
            validation.add_warning(
                "No access token configured for the aws backend. Set PORTAL_TOKEN or [auth] token.",
            );
        }
        validation
    }

    pub fn portal_client(&self, http: reqwest::Client) -> ResourceClient {
        ResourceClient::with_http_client(http, &self.api_url, token_source(self.token.as_deref()))
    }

    /// Same token as the portal; the aws haiku routes sit behind the same identity provider
    pub fn haiku_client(&self, http: reqwest::Client) -> ResourceClient {
        ResourceClient::with_http_client(http, &self.haiku_url, token_source(self.token.as_deref()))
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn check_url(validation: &mut ConfigValidation, label: &str, value: &str) {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => validation.add_error(format!(
            "{label} '{value}' uses unsupported scheme '{}'",
            parsed.scheme()
        )),
        Err(e) => validation.add_error(format!("{label} '{value}' is not a valid URL: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(api_url: Option<&str>, backend: Option<BackendFlavor>) -> EnvConfig {
        EnvConfig {
            api_url: api_url.map(String::from),
            backend,
            ..EnvConfig::default()
        }
    }

    // ============================================================================
    // Precedence tests
    // ============================================================================

    #[test]
    fn test_defaults_when_nothing_set() {
        let settings = Settings::resolve(
            &Overrides::default(),
            &EnvConfig::default(),
            &PortalConfig::default(),
        );
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.haiku_url, DEFAULT_HAIKU_URL);
        assert_eq!(settings.backend, BackendFlavor::Python);
        assert!(settings.token.is_none());
    }

    #[test]
    fn test_cli_beats_env_beats_file() {
        let file: PortalConfig = toml::from_str(
            r#"
[api]
base_url = "http://file:1/api"
backend = "aws"
"#,
        )
        .unwrap();
        let env = env_with(Some("http://env:2/api"), None);

        let settings = Settings::resolve(&Overrides::default(), &env, &file);
        assert_eq!(settings.api_url, "http://env:2/api");
        assert_eq!(settings.backend, BackendFlavor::Aws);

        let cli = Overrides {
            api_url: Some("http://cli:3/api".into()),
            backend: Some(BackendFlavor::Python),
            ..Overrides::default()
        };
        let settings = Settings::resolve(&cli, &env, &file);
        assert_eq!(settings.api_url, "http://cli:3/api");
        assert_eq!(settings.backend, BackendFlavor::Python);
    }

    #[test]
    fn test_blank_override_falls_through() {
        let cli = Overrides {
            token: Some("   ".into()),
            ..Overrides::default()
        };
        let env = EnvConfig {
            token: Some("env-token".into()),
            ..EnvConfig::default()
        };
        let settings = Settings::resolve(&cli, &env, &PortalConfig::default());
        assert_eq!(settings.token.as_deref(), Some("env-token"));
    }

    #[test]
    fn test_debug_hides_token() {
        let settings = Settings {
            token: Some("secret".into()),
            ..Settings::default()
        };
        assert!(!format!("{settings:?}").contains("secret"));
    }

    // ============================================================================
    // Validation tests
    // ============================================================================

    #[test]
    fn test_default_settings_valid() {
        let validation = Settings::default().validate();
        assert!(validation.is_valid());
        assert!(validation.warnings.is_empty());
        assert_eq!(validation.report(), "Configuration OK");
    }

    #[test]
    fn test_malformed_url_is_error() {
        let settings = Settings {
            api_url: "localhost:8000 api".into(),
            haiku_url: "ftp://example.com".into(),
            ..Settings::default()
        };
        let validation = settings.validate();
        assert_eq!(validation.errors.len(), 2);
        assert!(validation.report().starts_with("Errors:"));
    }

    #[test]
    fn test_aws_without_token_warns() {
        let settings = Settings {
            backend: BackendFlavor::Aws,
            ..Settings::default()
        };
        let validation = settings.validate();
        assert!(validation.is_valid());
        assert_eq!(validation.warnings.len(), 1);
    }

    // ============================================================================
    // BackendFlavor tests
    // ============================================================================

    #[test]
    fn test_flavor_parse() {
        assert_eq!("AWS".parse::<BackendFlavor>().ok(), Some(BackendFlavor::Aws));
        assert_eq!(" local ".parse::<BackendFlavor>().ok(), Some(BackendFlavor::Python));
        assert!("django".parse::<BackendFlavor>().is_err());
    }
}
