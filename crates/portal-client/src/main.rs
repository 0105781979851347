// crates/portal-client/src/main.rs
// Portal - terminal front end for the language portal and haiku service

use anyhow::Result;
use clap::Parser;
use portal::cli::{Cli, auth_hint, run};
use portal::config::PortalConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (~/.portal first, then ./.env); variables already set win
    let _ = dotenvy::from_path(PortalConfig::dotenv_path());
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let output = match run(cli).await {
        Ok(output) => output,
        Err(e) => {
            if let Some(hint) = auth_hint(&e) {
                eprintln!("{hint}");
            }
            return Err(e);
        }
    };
    print!("{output}");

    Ok(())
}
