//! Common test utilities.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use cksync_config::{ServerConfig, StaticConfig};
use cksync_server::{AppState, create_router};
use cksync_storage::{ChecklistRecord, ChecklistStore, Storage, StorageError};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const INDEX_HTML: &str = "<!doctype html><title>checklist</title>";

/// Router over a real SQLite store plus a content root with a few files.
pub struct TestServer {
    pub dir: TempDir,
    pub storage: Storage,
    pub router: Router,
}

impl TestServer {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let storage = cksync_storage::db::open_in(dir.path()).await.unwrap();
        let router = router_for(Arc::new(storage.clone()), &dir);
        Self {
            dir,
            storage,
            router,
        }
    }
}

pub fn router_for(store: Arc<dyn ChecklistStore>, dir: &TempDir) -> Router {
    let root = dir.path().join("public");
    std::fs::create_dir_all(root.join("css")).unwrap();
    std::fs::write(root.join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(root.join("config.php"), "<?php return ['pass' => 'secret'];").unwrap();
    std::fs::write(root.join("css").join("app.css"), "body{}").unwrap();

    let static_files = StaticConfig {
        root,
        ..StaticConfig::default()
    };
    let state = AppState::new(store, &ServerConfig::default(), static_files).unwrap();
    create_router(state)
}

/// Store whose medium is always unavailable.
pub struct BrokenStore;

fn unavailable() -> StorageError {
    StorageError::Io(std::io::Error::other("disk unavailable"))
}

#[async_trait]
impl ChecklistStore for BrokenStore {
    async fn get(&self, _sync_id: &str) -> cksync_storage::Result<String> {
        Err(unavailable())
    }

    async fn put(&self, _sync_id: &str, _data_json: &str) -> cksync_storage::Result<()> {
        Err(unavailable())
    }

    async fn delete(&self, _sync_id: &str) -> cksync_storage::Result<bool> {
        Err(unavailable())
    }

    async fn resolve_short_code(&self, _short_code: &str) -> cksync_storage::Result<String> {
        Err(unavailable())
    }

    async fn get_record(&self, _sync_id: &str) -> cksync_storage::Result<ChecklistRecord> {
        Err(unavailable())
    }
}

/// Send a request and return status, headers and raw body.
pub async fn raw_request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(text.to_string())
        }
        None => Body::empty(),
    };

    let request = builder.body(body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, body_bytes.to_vec())
}

/// Send a request and parse the response body as JSON.
pub async fn json_request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let (status, _, bytes) = raw_request(router, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
