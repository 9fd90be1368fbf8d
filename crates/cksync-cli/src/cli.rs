use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cksync")]
#[command(about = "Sync backend for shared checklists", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "CKSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database file, overrides the config
    #[arg(long, global = true, env = "CKSYNC_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        /// Content root for static files
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Print a stored checklist
    Get {
        /// 8 character sync id
        sync_id: String,
    },

    /// Delete a stored checklist
    Delete {
        /// 8 character sync id
        sync_id: String,
    },

    /// Show the resolved configuration
    Config,
}
