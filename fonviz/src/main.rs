mod cli;
mod commands;
mod config;
mod web;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{cli::Cli, config::AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    info!("using fund store {}", config.db_file.display());
    commands::run(cli.command, config).await
}
