use anyhow::Result;
use cksync_config::Config;
use cksync_server::{AppState, SyncServer};
use cksync_storage::Storage;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn handle(
    storage: &Storage,
    config: &Config,
    host: Option<String>,
    port: Option<u16>,
    root: Option<PathBuf>,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let mut static_files = config.static_files.clone();
    if let Some(root) = root {
        static_files.root = root;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        root = %static_files.root.display(),
        "Starting cksync"
    );

    let state = AppState::new(Arc::new(storage.clone()), &config.server, static_files)?;
    SyncServer::serve(state, &host, port, shutdown_signal()).await
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
