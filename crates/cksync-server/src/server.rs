use anyhow::Context;
use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use axum::routing::any;
use cksync_config::{ServerConfig, StaticConfig};
use cksync_storage::ChecklistStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{api, static_files};

/// Paths the API endpoint is mounted on.
pub const API_PATHS: [&str; 2] = ["/api.php", "/api"];

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Shared, immutable per-process state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChecklistStore>,
    pub static_files: Arc<StaticConfig>,
    pub allow_origin: HeaderValue,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ChecklistStore>,
        server: &ServerConfig,
        static_files: StaticConfig,
    ) -> anyhow::Result<Self> {
        let allow_origin = HeaderValue::from_str(&server.allow_origin)
            .with_context(|| format!("invalid allow_origin {:?}", server.allow_origin))?;

        Ok(Self {
            store,
            static_files: Arc::new(static_files),
            allow_origin,
        })
    }
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let mut api_routes = Router::new();
    for path in API_PATHS {
        api_routes = api_routes.route(path, any(api::handle_api));
    }

    let api_routes = api_routes
        .layer(SetResponseHeaderLayer::overriding(
            CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            state.allow_origin.clone(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ));

    Router::new()
        .merge(api_routes)
        .fallback(static_files::serve)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct SyncServer;

impl SyncServer {
    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn serve<F>(
        state: AppState,
        host: &str,
        port: u16,
        shutdown: F,
    ) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = create_router(state);

        let addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind to {}", addr))?;

        info!("Sync server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Sync server stopped");
        Ok(())
    }
}
