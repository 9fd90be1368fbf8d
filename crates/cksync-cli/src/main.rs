mod cli;
mod commands;

use anyhow::Result;
use cksync_config::Config;
use cksync_storage::Storage;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let db_path = cli
        .db
        .or_else(|| config.storage.db_path.clone())
        .unwrap_or_else(Storage::default_db_path);

    commands::run(cli.command, &config, cli.config.as_deref(), &db_path).await
}
