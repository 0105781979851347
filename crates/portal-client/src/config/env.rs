// crates/portal-client/src/config/env.rs
// PORTAL_* / HAIKU_* environment variables

use super::BackendFlavor;
use tracing::{debug, info, warn};

/// Problems found while resolving settings.
///
/// Errors make the settings unusable; warnings are printed and ignored.
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn merge(&mut self, other: ConfigValidation) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }

    /// Errors first, then warnings, one `  - ` line each
    pub fn report(&self) -> String {
        let sections = [("Errors:", &self.errors), ("Warnings:", &self.warnings)];
        let lines: Vec<String> = sections
            .iter()
            .filter(|(_, items)| !items.is_empty())
            .flat_map(|(heading, items)| {
                std::iter::once(heading.to_string()).chain(items.iter().map(|m| format!("  - {m}")))
            })
            .collect();
        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Settings read from the process environment; blank values count as unset
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// Portal API base URL (PORTAL_API_URL)
    pub api_url: Option<String>,
    /// Haiku service base URL (HAIKU_API_URL)
    pub haiku_url: Option<String>,
    /// Bearer token (PORTAL_TOKEN)
    pub token: Option<String>,
    /// Backend flavour (PORTAL_BACKEND)
    pub backend: Option<BackendFlavor>,
    /// Raw PORTAL_BACKEND value when it did not parse
    pub unknown_backend: Option<String>,
}

impl EnvConfig {
    pub fn load() -> Self {
        info!("reading portal environment");
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// `lookup` stands in for `std::env::var` so tests need not touch the process env
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let (backend, unknown_backend) = match read("PORTAL_BACKEND") {
            Some(raw) => match raw.parse::<BackendFlavor>() {
                Ok(flavor) => (Some(flavor), None),
                Err(_) => {
                    warn!(value = %raw, "PORTAL_BACKEND not recognised");
                    (None, Some(raw))
                }
            },
            None => (None, None),
        };

        let config = Self {
            api_url: read("PORTAL_API_URL"),
            haiku_url: read("HAIKU_API_URL"),
            token: read("PORTAL_TOKEN"),
            backend,
            unknown_backend,
        };
        debug!(
            api_url = ?config.api_url,
            haiku_url = ?config.haiku_url,
            has_token = config.token.is_some(),
            "environment resolved"
        );
        config
    }

    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();
        if let Some(raw) = &self.unknown_backend {
            validation.add_warning(format!(
                "PORTAL_BACKEND '{raw}' is not python or aws, using the default"
            ));
        }
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_environment() {
        let config = EnvConfig::from_lookup(lookup(&[]));
        assert!(config.api_url.is_none());
        assert!(config.token.is_none());
        assert!(config.validate().warnings.is_empty());
    }

    #[test]
    fn test_reads_all_vars() {
        let config = EnvConfig::from_lookup(lookup(&[
            ("PORTAL_API_URL", "http://api:9000/api"),
            ("HAIKU_API_URL", "http://haiku:9001"),
            ("PORTAL_TOKEN", "abc"),
            ("PORTAL_BACKEND", "aws"),
        ]));
        assert_eq!(config.api_url.as_deref(), Some("http://api:9000/api"));
        assert_eq!(config.haiku_url.as_deref(), Some("http://haiku:9001"));
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.backend, Some(BackendFlavor::Aws));
    }

    #[test]
    fn test_blank_token_ignored() {
        let config = EnvConfig::from_lookup(lookup(&[("PORTAL_TOKEN", "  ")]));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_unknown_backend_warns() {
        let config = EnvConfig::from_lookup(lookup(&[("PORTAL_BACKEND", "django")]));
        assert!(config.backend.is_none());
        let validation = config.validate();
        assert!(validation.is_valid());
        assert_eq!(validation.warnings.len(), 1);
    }

    #[test]
    fn test_merge_and_report() {
        let mut a = ConfigValidation::new();
        a.add_warning("w");
        let mut b = ConfigValidation::new();
        b.add_error("e");
        a.merge(b);
        assert!(!a.is_valid());
        assert_eq!(a.report(), "Errors:\n  - e\nWarnings:\n  - w");
    }
}
