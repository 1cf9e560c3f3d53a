//! Homework bot CLI
//!
//! Command-line interface for the homework review status watcher.

use std::path::PathBuf;

use clap::Parser;
use homework_bot::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Watches homework review statuses and reports changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    /// Fetch once from the given unix timestamp, print the raw answer and exit
    #[arg(long, value_name = "FROM_DATE")]
    probe: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}, probe={:?}",
        args.config,
        args.log_level,
        args.probe
    );

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets();

    if let Some(from_date) = args.probe {
        let answer = homework_bot::probe(&config, from_date).await?;
        println!("{}", serde_json::to_string_pretty(&answer)?);
        return Ok(());
    }

    let credentials = config.credentials()?;

    tracing::info!("Starting homework bot");
    tracing::debug!(
        "Endpoint: {}, interval: {:?}, request timeout: {:?}",
        config.api.endpoint,
        config.polling.interval,
        config.polling.request_timeout
    );

    homework_bot::run(config, credentials).await?;

    Ok(())
}
