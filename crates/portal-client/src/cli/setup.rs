// crates/portal-client/src/cli/setup.rs
// `portal config check`: where configuration comes from and whether it is usable

use super::Context;
use crate::config::{EnvConfig, PortalConfig};
use std::fmt::Write;
use std::path::{Path, PathBuf};

fn presence(path: &Path) -> &'static str {
    if path.exists() { "exists" } else { "not found" }
}

pub fn check(ctx: &Context, config_override: &Option<PathBuf>) -> String {
    let mut out = String::from("Portal Configuration Status\n\n");

    let config_path = config_override
        .clone()
        .unwrap_or_else(PortalConfig::config_path);
    let env_path = PortalConfig::dotenv_path();
    let _ = writeln!(out, "  config.toml: {} ({})", config_path.display(), presence(&config_path));
    let _ = writeln!(out, "  .env file: {} ({})", env_path.display(), presence(&env_path));

    let settings = &ctx.settings;
    let _ = writeln!(out, "\n  API URL: {}", settings.api_url);
    let _ = writeln!(out, "  Haiku URL: {}", settings.haiku_url);
    let _ = writeln!(out, "  Backend: {}", settings.backend);
    let _ = writeln!(
        out,
        "  Token: {}",
        if settings.token.is_some() { "configured" } else { "none" }
    );

    let mut validation = EnvConfig::load().validate();
    validation.merge(settings.validate());
    let _ = writeln!(out, "\n{}", validation.report());
    out
}
