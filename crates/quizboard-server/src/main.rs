//! Quizboard Server - Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use quizboard_common::logging::{init_logging, LogConfig};
use std::path::PathBuf;
use tracing::info;

use quizboard_server::{api, config::Config};

/// Quizboard - Google Sheets and Docs as JSON for the trivia dashboard
#[derive(Parser, Debug)]
#[command(name = "quizboard-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Host to bind (overrides QUIZBOARD_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides QUIZBOARD_PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.env_file {
        dotenvy::from_path(path)
            .with_context(|| format!("Failed to load env file {}", path.display()))?;
    } else {
        dotenvy::dotenv().ok();
    }

    let log_config = LogConfig::new("quizboard-server")
        .with_filter("quizboard_server=debug,tower_http=debug")
        .apply_env()?;

    let _log_guard = init_logging(&log_config)?;

    info!("Starting Quizboard Server");

    let mut config = Config::load()?;
    if args.host.is_some() || args.port.is_some() {
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        config.validate()?;
    }

    info!(
        sheets = config.sources.sheets.len(),
        documents = config.sources.documents.len(),
        "Configuration loaded - server will bind to {}:{}",
        config.server.host,
        config.server.port
    );

    api::serve(config).await?;

    Ok(())
}
