//! Storage layer for cksync
//!
//! This crate provides:
//! - The `ChecklistStore` contract used by the request handler
//! - SQLite-backed implementation (`Storage`)
//! - The persisted `ChecklistRecord` row

pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use db::Storage;
pub use error::{Result, StorageError};
pub use models::ChecklistRecord;
pub use store::ChecklistStore;
