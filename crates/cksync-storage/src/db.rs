//! Database operations

use async_trait::async_trait;
use cksync_core::SyncId;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::OffsetDateTime;

use crate::models::ChecklistRecord;
use crate::store::ChecklistStore;
use crate::{Result, StorageError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS checklists (
    sync_id TEXT PRIMARY KEY,
    data_json TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const DB_FILE_NAME: &str = "cksync.db";

/// SQLite-backed checklist store.
///
/// Cheap to clone: clones share one connection pool.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    /// Open (creating if needed) the database at `db_path`, or at the
    /// platform data directory when `None`, and ensure the schema exists.
    pub async fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = db_path.unwrap_or_else(Self::default_db_path);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            // Every write must be on disk before the request is acknowledged.
            .synchronous(SqliteSynchronous::Full)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await?;

        let storage = Self { pool };
        storage.migrate().await?;

        tracing::info!(path = %path.display(), "Opened checklist database");

        Ok(storage)
    }

    /// Default database location
    pub fn default_db_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "cksync", "cksync") {
            dirs.data_dir().join(DB_FILE_NAME)
        } else {
            PathBuf::from(DB_FILE_NAME)
        }
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for in-flight queries to finish.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Closed checklist database");
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

/// Malformed keys can never have been stored, so lookups skip the database.
fn well_formed(sync_id: &str) -> bool {
    SyncId::parse(sync_id).is_ok()
}

#[async_trait]
impl ChecklistStore for Storage {
    async fn get(&self, sync_id: &str) -> Result<String> {
        if !well_formed(sync_id) {
            return Err(StorageError::NotFound(sync_id.to_string()));
        }

        let row: Option<(String,)> =
            sqlx::query_as("SELECT data_json FROM checklists WHERE sync_id = ?")
                .bind(sync_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(data_json,)| data_json)
            .ok_or_else(|| StorageError::NotFound(sync_id.to_string()))
    }

    async fn put(&self, sync_id: &str, data_json: &str) -> Result<()> {
        if !well_formed(sync_id) {
            return Err(StorageError::InvalidKey(sync_id.to_string()));
        }

        let now = OffsetDateTime::now_utc();
        sqlx::query(
            "INSERT INTO checklists (sync_id, data_json, created_at, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(sync_id) DO UPDATE SET data_json = excluded.data_json, updated_at = excluded.updated_at",
        )
        .bind(sync_id)
        .bind(data_json)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        tracing::debug!(sync_id, bytes = data_json.len(), "Saved checklist");
        Ok(())
    }

    async fn delete(&self, sync_id: &str) -> Result<bool> {
        if !well_formed(sync_id) {
            return Ok(false);
        }

        let result = sqlx::query("DELETE FROM checklists WHERE sync_id = ?")
            .bind(sync_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn resolve_short_code(&self, short_code: &str) -> Result<String> {
        if !well_formed(short_code) {
            return Err(StorageError::NotFound(short_code.to_string()));
        }

        let row: Option<(String,)> =
            sqlx::query_as("SELECT sync_id FROM checklists WHERE sync_id = ?")
                .bind(short_code)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(sync_id,)| sync_id)
            .ok_or_else(|| StorageError::NotFound(short_code.to_string()))
    }

    async fn get_record(&self, sync_id: &str) -> Result<ChecklistRecord> {
        if !well_formed(sync_id) {
            return Err(StorageError::NotFound(sync_id.to_string()));
        }

        sqlx::query_as::<_, ChecklistRecord>(
            "SELECT sync_id, data_json, created_at, updated_at FROM checklists WHERE sync_id = ?",
        )
        .bind(sync_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StorageError::NotFound(sync_id.to_string()))
    }
}

/// Open a store rooted in `dir`, for tools and tests that manage their own
/// scratch directory.
pub async fn open_in(dir: &Path) -> Result<Storage> {
    Storage::new(Some(dir.join(DB_FILE_NAME))).await
}
