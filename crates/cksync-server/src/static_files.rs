//! Static content responder.
//!
//! Serves the content root for every path outside the API, with two rules on
//! top of plain file serving:
//! - configured forbidden paths answer 403 for any method
//! - an 8 byte path without a dot serves the index document, so a shared
//!   `/<sync_id>` link opens the client app

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cksync_core::SYNC_ID_LEN;
use percent_encoding::percent_decode_str;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::server::AppState;

/// Fallback handler for non-API paths
pub async fn serve(State(state): State<AppState>, req: Request) -> Response {
    let path = normalize(req.uri().path());
    let config = &state.static_files;

    if config.forbidden.iter().any(|forbidden| *forbidden == path) {
        tracing::warn!(%path, "Blocked request for forbidden path");
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    let result = if is_sync_id_path(&path) {
        ServeFile::new(config.root.join(&config.index))
            .oneshot(req)
            .await
    } else {
        ServeDir::new(&config.root).oneshot(req).await
    };

    match result {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Decode percent escapes and collapse empty and `.` segments, so that
/// `/%63onfig.php` and `//config.php` compare equal to `/config.php`.
fn normalize(raw: &str) -> String {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    let segments: Vec<&str> = decoded
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    format!("/{}", segments.join("/"))
}

fn is_sync_id_path(path: &str) -> bool {
    if path == "/" || path.contains('.') {
        return false;
    }
    path.trim_start_matches('/').len() == SYNC_ID_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("/config.php"), "/config.php");
        assert_eq!(normalize("//config.php"), "/config.php");
        assert_eq!(normalize("/./config.php"), "/config.php");
        assert_eq!(normalize("/%63onfig.php"), "/config.php");
        assert_eq!(normalize("/css/app.css"), "/css/app.css");
    }

    #[test]
    fn test_sync_id_paths() {
        assert!(is_sync_id_path("/ABCD1234"));
        assert!(is_sync_id_path("/abc/defg"));
        assert!(!is_sync_id_path("/"));
        assert!(!is_sync_id_path("/ABCD123"));
        assert!(!is_sync_id_path("/ABCD12345"));
        assert!(!is_sync_id_path("/main.css"));
        assert!(!is_sync_id_path("/ABCD.234"));
    }
}
