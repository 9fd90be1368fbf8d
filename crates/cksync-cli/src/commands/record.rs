use anyhow::{Context, Result};
use cksync_core::SyncId;
use cksync_storage::{ChecklistStore, Storage};

pub async fn get(storage: &Storage, sync_id: &str) -> Result<()> {
    let sync_id = SyncId::parse(sync_id)?;
    let record = storage
        .get_record(sync_id.as_str())
        .await
        .with_context(|| format!("no checklist stored under {}", sync_id))?;

    let data: serde_json::Value =
        serde_json::from_str(&record.data_json).context("stored document is not valid JSON")?;

    println!("sync_id:    {}", record.sync_id);
    println!("created_at: {}", record.created_at);
    println!("updated_at: {}", record.updated_at);
    println!("{}", serde_json::to_string_pretty(&data)?);

    Ok(())
}

pub async fn delete(storage: &Storage, sync_id: &str) -> Result<()> {
    let sync_id = SyncId::parse(sync_id)?;

    if !storage.delete(sync_id.as_str()).await? {
        anyhow::bail!("no checklist stored under {}", sync_id);
    }

    println!("✓ Deleted {}", sync_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = cksync_storage::db::open_in(dir.path()).await.unwrap();

        assert!(get(&storage, "ABCD1234").await.is_err());
        assert!(get(&storage, "short").await.is_err());

        storage.put("ABCD1234", r#"{"x":1}"#).await.unwrap();
        get(&storage, "ABCD1234").await.unwrap();

        delete(&storage, "ABCD1234").await.unwrap();
        assert!(delete(&storage, "ABCD1234").await.is_err());
    }
}
