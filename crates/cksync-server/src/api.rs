//! The `?action=` endpoint.
//!
//! Each request goes through parse, validate, dispatch and respond with no
//! state kept between requests.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use cksync_core::SyncId;
use cksync_storage::ChecklistStore;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};
use crate::server::AppState;

/// Query parameters accepted by the endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ApiParams {
    #[serde(default)]
    pub action: String,
    pub sync_id: Option<String>,
    pub short_code: Option<String>,
}

/// Logical operation selected by method and `action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Preflight,
    FetchData,
    SaveData,
    ResolveShortCode,
    DeleteData,
    Unknown,
}

impl Operation {
    pub fn parse(method: &Method, action: &str) -> Self {
        match (method, action) {
            (&Method::OPTIONS, _) => Self::Preflight,
            (&Method::GET, "data") => Self::FetchData,
            (&Method::POST, "data") => Self::SaveData,
            (&Method::GET, "shortcode") => Self::ResolveShortCode,
            (&Method::POST, "delete") => Self::DeleteData,
            _ => Self::Unknown,
        }
    }
}

/// Members of a JSON object body. Only a JSON object deserializes into a
/// map, so arrays and scalars never get this far.
type ObjectBody = HashMap<String, Box<RawValue>>;

fn parse_object(body: &[u8]) -> Option<ObjectBody> {
    serde_json::from_slice(body).ok()
}

/// A validated `POST ?action=data` body.
#[derive(Debug)]
struct SaveRequest {
    sync_id: SyncId,
    /// Compact serialization of the client's document.
    data_json: String,
}

impl SaveRequest {
    /// `data` must be present; `null` is a valid document.
    fn parse(body: &[u8]) -> Option<Self> {
        let members = parse_object(body)?;
        let sync_id: SyncId = serde_json::from_str(members.get("sync_id")?.get()).ok()?;
        let data = members.get("data")?;

        // Numbers keep their literal text, so re-serializing only drops
        // insignificant whitespace.
        let value: Value = serde_json::from_str(data.get()).ok()?;
        let data_json = serde_json::to_string(&value).ok()?;

        Some(Self { sync_id, data_json })
    }
}

/// Sync id of a `POST ?action=delete` body, if there is a string one.
fn delete_target(body: &[u8]) -> Option<String> {
    let members = parse_object(body)?;
    serde_json::from_str(members.get("sync_id")?.get()).ok()
}

#[derive(Serialize)]
struct DataResponse<'a> {
    data: &'a RawValue,
}

/// Handler for every method on the API path
pub async fn handle_api(
    State(state): State<AppState>,
    method: Method,
    params: Option<Query<ApiParams>>,
    body: Bytes,
) -> Response {
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let operation = Operation::parse(&method, &params.action);

    tracing::debug!(?operation, action = %params.action, "API request");

    match dispatch(state.store.as_ref(), operation, &params, &body).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn dispatch(
    store: &dyn ChecklistStore,
    operation: Operation,
    params: &ApiParams,
    body: &[u8],
) -> ApiResult<Response> {
    match operation {
        Operation::Preflight => Ok(StatusCode::NO_CONTENT.into_response()),
        Operation::FetchData => fetch_data(store, params.sync_id.as_deref()).await,
        Operation::SaveData => save_data(store, body).await,
        Operation::ResolveShortCode => {
            resolve_short_code(store, params.short_code.as_deref()).await
        }
        Operation::DeleteData => delete_data(store, body).await,
        Operation::Unknown => Err(ApiError::UnknownOperation),
    }
}

fn validate(raw: Option<&str>, message: &'static str) -> ApiResult<SyncId> {
    raw.and_then(|raw| SyncId::parse(raw).ok())
        .ok_or(ApiError::InvalidKey(message))
}

async fn fetch_data(store: &dyn ChecklistStore, sync_id: Option<&str>) -> ApiResult<Response> {
    let sync_id = validate(sync_id, "invalid sync_id")?;

    let data_json = store
        .get(sync_id.as_str())
        .await
        .map_err(|e| ApiError::from_storage(e, "invalid sync_id", "server error"))?;

    // Emitted verbatim, never reparsed into numbers.
    let data = RawValue::from_string(data_json).map_err(|e| {
        tracing::error!(%sync_id, error = %e, "Stored document is not valid JSON");
        ApiError::StorageUnavailable("server error")
    })?;

    Ok(Json(DataResponse { data: &data }).into_response())
}

async fn save_data(store: &dyn ChecklistStore, body: &[u8]) -> ApiResult<Response> {
    let request = SaveRequest::parse(body).ok_or(ApiError::InvalidKey("invalid input"))?;

    store
        .put(request.sync_id.as_str(), &request.data_json)
        .await
        .map_err(|e| ApiError::from_storage(e, "invalid input", "save failed"))?;

    tracing::info!(sync_id = %request.sync_id, "Checklist saved");
    Ok(Json(json!({ "result": "ok" })).into_response())
}

async fn resolve_short_code(
    store: &dyn ChecklistStore,
    short_code: Option<&str>,
) -> ApiResult<Response> {
    let short_code = validate(short_code, "invalid short_code")?;

    let sync_id = store
        .resolve_short_code(short_code.as_str())
        .await
        .map_err(|e| ApiError::from_storage(e, "invalid short_code", "server error"))?;

    Ok(Json(json!({ "sync_id": sync_id })).into_response())
}

async fn delete_data(store: &dyn ChecklistStore, body: &[u8]) -> ApiResult<Response> {
    // An unreadable body is treated like one without an id.
    let sync_id = validate(delete_target(body).as_deref(), "invalid sync_id")?;

    let existed = store
        .delete(sync_id.as_str())
        .await
        .map_err(|e| ApiError::from_storage(e, "invalid sync_id", "server error"))?;

    if !existed {
        return Err(ApiError::NotFound);
    }

    tracing::info!(%sync_id, "Checklist deleted");
    Ok(Json(json!({ "result": "deleted" })).into_response())
}
