//! Core domain types for cksync
//!
//! This crate contains:
//! - The sync identifier shared by the store and the request handler
//! - Core error types

pub mod error;
pub mod sync_id;

pub use error::{CoreError, Result};
pub use sync_id::{SYNC_ID_LEN, SyncId};
