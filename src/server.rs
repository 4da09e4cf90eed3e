//! HTTP front door for the blob store
//!
//! Thin transport over [`ContentStore`]: multipart or raw upload returns the
//! content key, download and delete are keyed by it. Routing, form parsing,
//! and status mapping live here; everything content-addressed lives in the
//! store.

use crate::{ContentStore, Error, Key};
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Bootstrap configuration for the HTTP server
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Directory blobs are stored under
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: "127.0.0.1:8080".parse().expect("valid literal addr"),
            root: PathBuf::from("/tmp/media"),
        }
    }
}

/// Errors surfaced at the HTTP boundary
///
/// Absent blobs map to 404, malformed keys and bad uploads to 400, and
/// everything else to a generic 500 - storage detail never leaks to clients.
enum ApiError {
    Store(Error),
    BadRequest(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Store(Error::NotFound(key)) => {
                (StatusCode::NOT_FOUND, format!("blob not found: {key}"))
            }
            ApiError::Store(Error::InvalidKey(key)) => {
                (StatusCode::BAD_REQUEST, format!("invalid key: {key}"))
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "storage operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage failure".into())
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal failure".into())
            }
        };
        (status, message).into_response()
    }
}

/// Build the router over a store
pub fn build_router(store: ContentStore) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/storage", post(upload))
        .route("/storage/raw", post(upload_raw))
        .route("/storage/:key", get(download).delete(remove))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Open the store and serve requests until the process exits
pub async fn serve(config: ServerConfig) -> crate::Result<()> {
    let store = ContentStore::open(&config.root)?;
    let app = build_router(store);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, root = %config.root.display(), "casket listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn upload(
    State(store): State<ContentStore>,
    mut multipart: Multipart,
) -> Result<String, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read file field: {e}")))?;
        let key = put_blocking(&store, data.to_vec()).await?;
        return Ok(key.to_hex());
    }
    Err(ApiError::BadRequest("missing \"file\" field".into()))
}

async fn upload_raw(
    State(store): State<ContentStore>,
    body: axum::body::Bytes,
) -> Result<String, ApiError> {
    let key = put_blocking(&store, body.to_vec()).await?;
    Ok(key.to_hex())
}

async fn download(
    State(store): State<ContentStore>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let key: Key = key.parse()?;
    let bytes = tokio::task::spawn_blocking(move || store.get_bytes(&key))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    match bytes {
        Some(bytes) => Ok((
            [(header::CONTENT_TYPE, "application/octet-stream")],
            bytes,
        )
            .into_response()),
        None => Err(ApiError::Store(Error::NotFound(key.to_hex()))),
    }
}

async fn remove(
    State(store): State<ContentStore>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    let key: Key = key.parse()?;
    tokio::task::spawn_blocking(move || store.delete(&key))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(StatusCode::NO_CONTENT)
}

async fn put_blocking(store: &ContentStore, data: Vec<u8>) -> Result<Key, ApiError> {
    let store = store.clone();
    tokio::task::spawn_blocking(move || store.put_bytes(&data))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>casket</title>
</head>
<body>
<form method="post" action="/storage" enctype="multipart/form-data">
  <div>
    <label for="file">Choose a file</label>
    <input type="file" id="file" name="file">
  </div>
  <div>
    <button>Upload</button>
  </div>
</form>
</body>
</html>
"#;
