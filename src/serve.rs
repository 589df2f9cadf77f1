//! Static file server for page content.
//!
//! Serves files under a root directory so that route content locations
//! such as `/pages/home.html` resolve during local runs.

use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path as UrlPath, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Response, StatusCode};
use axum::routing::get;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Failed to bind '{addr}': {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the router serving files below `root`.
pub fn router(root: PathBuf) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/{*path}", get(serve_file))
        .with_state(Arc::new(root))
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn run(
    addr: &str,
    root: PathBuf,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServeError::Bind {
            addr: addr.to_string(),
            source: e,
        })?;
    tracing::info!(addr = %listener.local_addr()?, root = %root.display(), "serving content");

    axum::serve(listener, router(root))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn serve_index(State(root): State<Arc<PathBuf>>) -> Response<Body> {
    read_file(&root, "index.html").await
}

async fn serve_file(
    State(root): State<Arc<PathBuf>>,
    UrlPath(path): UrlPath<String>,
) -> Response<Body> {
    read_file(&root, &path).await
}

async fn read_file(root: &Path, relative: &str) -> Response<Body> {
    let Some(file) = resolve_under(root, relative) else {
        return status(StatusCode::BAD_REQUEST);
    };

    match tokio::fs::read(&file).await {
        Ok(bytes) => {
            tracing::debug!(file = %file.display(), "served");
            Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, content_type(&file))
                .body(Body::from(bytes))
                .unwrap_or_else(|_| status(StatusCode::INTERNAL_SERVER_ERROR))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => status(StatusCode::NOT_FOUND),
        Err(err) => {
            tracing::warn!(file = %file.display(), error = %err, "failed to read file");
            status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Join `relative` onto `root`, refusing anything that could escape it.
fn resolve_under(root: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative.trim_start_matches('/'));
    let mut resolved = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(resolved)
}

fn content_type(file: &Path) -> &'static str {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

fn status(code: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = code;
    response
}
