//! Blob store contract

use async_trait::async_trait;

use crate::Result;
use crate::models::ChecklistRecord;

/// Identifier-keyed store of opaque JSON documents.
///
/// Documents cross this boundary as serialized JSON text; the store never
/// parses them. Keys that are not exactly eight bytes long are treated as
/// absent by every read and delete.
#[async_trait]
pub trait ChecklistStore: Send + Sync {
    /// Fetch the stored document text for `sync_id`.
    async fn get(&self, sync_id: &str) -> Result<String>;

    /// Insert or fully replace the document for `sync_id`, bumping `updated_at`.
    async fn put(&self, sync_id: &str, data_json: &str) -> Result<()>;

    /// Remove the record. Returns whether a record existed.
    async fn delete(&self, sync_id: &str) -> Result<bool>;

    /// Short codes share the sync id namespace: resolution is an existence
    /// check that returns the identifier itself.
    async fn resolve_short_code(&self, short_code: &str) -> Result<String>;

    /// Fetch the full row including timestamps.
    async fn get_record(&self, sync_id: &str) -> Result<ChecklistRecord>;
}
