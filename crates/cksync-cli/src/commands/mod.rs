pub mod config;
pub mod record;
pub mod serve;

use anyhow::{Context, Result};
use cksync_config::Config;
use cksync_storage::Storage;
use std::path::Path;

use crate::cli::Commands;

/// Dispatch a command. Storage is opened only for commands that touch it,
/// and closed again before returning.
pub async fn run(
    command: Commands,
    config: &Config,
    config_path: Option<&Path>,
    db_path: &Path,
) -> Result<()> {
    if let Commands::Config = command {
        return config::handle(config, config_path, db_path);
    }

    // Failing to open storage is fatal at boot
    let storage = Storage::new(Some(db_path.to_path_buf()))
        .await
        .context("failed to open checklist database")?;

    let result = match command {
        Commands::Serve { host, port, root } => {
            serve::handle(&storage, config, host, port, root).await
        }
        Commands::Get { sync_id } => record::get(&storage, &sync_id).await,
        Commands::Delete { sync_id } => record::delete(&storage, &sync_id).await,
        Commands::Config => Ok(()),
    };

    storage.close().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_does_not_create_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("cksync.db");

        run(Commands::Config, &Config::default(), None, &db_path)
            .await
            .unwrap();

        assert!(!db_path.exists());
        assert!(!dir.path().join("data").exists());
    }

    #[tokio::test]
    async fn test_storage_commands_open_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cksync.db");

        let result = run(
            Commands::Get {
                sync_id: "ABCD1234".to_string(),
            },
            &Config::default(),
            None,
            &db_path,
        )
        .await;

        assert!(result.is_err());
        assert!(db_path.exists());
    }
}
