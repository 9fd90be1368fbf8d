use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid sync id: expected {expected} bytes, got {actual}")]
    InvalidSyncId { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, CoreError>;
