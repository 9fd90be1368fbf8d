//! Error types for cksync-storage

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid sync id: {0}")]
    InvalidKey(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// True when the storage medium itself failed, as opposed to a lookup miss
    /// or a rejected key.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Io(_))
    }
}
