use serde::Serialize;
use time::OffsetDateTime;

/// One stored checklist document, as persisted in the `checklists` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ChecklistRecord {
    pub sync_id: String,
    /// Serialized JSON document, stored verbatim.
    pub data_json: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::timestamp")]
    pub updated_at: OffsetDateTime,
}
