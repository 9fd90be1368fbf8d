//! HTTP surface for cksync
//!
//! - `api`: the single action-dispatched JSON endpoint
//! - `static_files`: content root responder with sync id rewriting
//! - `server`: router assembly and process lifecycle

pub mod api;
pub mod error;
pub mod server;
pub mod static_files;

pub use error::ApiError;
pub use server::{AppState, SyncServer, create_router};
