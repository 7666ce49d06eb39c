//! Vidask CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidask::cli::{commands, Cli, Commands};
use vidask::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = match &cli.config {
        Some(path) => Settings::expand_path(path),
        None => Settings::default_config_path(),
    };
    let mut settings = Settings::load_from(Some(&config_path))?;
    if let Some(server) = &cli.server {
        settings.collaborators.base_url = server.clone();
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("vidask={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    // Execute command
    match &cli.command {
        Commands::Analyze { url, questions, quiet } => {
            commands::run_analyze(url, questions, *quiet, settings).await?;
        }

        Commands::Session { url } => {
            commands::run_session(url.as_deref(), settings).await?;
        }

        Commands::Transcript { url, output, format } => {
            commands::run_transcript(url, output.clone(), format, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, config_path.clone())?;
        }
    }

    Ok(())
}
