//! Web UI server
//!
//! Serves a single page plus a small JSON API over loopback. Each handler
//! re-reads the files it needs; there is no locking, so edits made from the
//! CLI while the UI is open are last-write-wins.

use std::net::SocketAddr;
use std::process::Command;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use ccs_core::{
    read_active_settings, resolve_active, switch_profile, ClaudePaths, ProfileStore, StoreError,
    StoreResult,
};

/// Port used when neither `--port` nor `CCS_UI_PORT` is given
pub const DEFAULT_PORT: u16 = 3456;
const PORT_ENV: &str = "CCS_UI_PORT";

const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Clone)]
struct UiState {
    paths: Arc<ClaudePaths>,
}

/// Errors returned by API handlers as `{"error", "code"}` bodies
#[derive(Debug)]
enum ApiError {
    Store(StoreError),
    BadRequest(String),
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonSyntaxError(e) => format!("Malformed JSON: {e}"),
            JsonRejection::JsonDataError(e) => format!("Invalid JSON payload: {e}"),
            JsonRejection::MissingJsonContentType(_) => {
                "Expected Content-Type: application/json".to_string()
            }
            other => format!("Request body error: {other}"),
        };
        Self::BadRequest(message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Store(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, err.code(), err.to_string())
            }
            Self::Store(err) => {
                error!(error = %err, "web ui request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.code(), err.to_string())
            }
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", message),
            Self::Internal(message) => {
                error!(error = %message, "web ui task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
            }
        };
        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Run a store operation off the async workers
async fn blocking<T, F>(state: &UiState, op: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&ClaudePaths) -> StoreResult<T> + Send + 'static,
{
    let paths = Arc::clone(&state.paths);
    let result = tokio::task::spawn_blocking(move || op(&paths))
        .await
        .map_err(|e| ApiError::Internal(format!("Background task failed: {e}")))?;
    Ok(result?)
}

/// Start the server and block until Ctrl+C
pub fn execute(port: Option<u16>, open_browser: bool) -> Result<()> {
    let paths = ClaudePaths::from_env()?;
    let port = match port {
        Some(port) => port,
        None => port_from_env()?,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(serve(paths, port, open_browser))
}

fn port_from_env() -> Result<u16> {
    match std::env::var(PORT_ENV) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {PORT_ENV}: '{value}'")),
        _ => Ok(DEFAULT_PORT),
    }
}

async fn serve(paths: ClaudePaths, port: u16, open_browser: bool) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind web UI on {addr}"))?;

    let url = format!("http://localhost:{port}");
    info!(listen_addr = %addr, "starting web ui");
    println!("Web UI running at {url}");
    println!("Press Ctrl+C to stop the server");

    if open_browser {
        if let Err(e) = open_url(&url) {
            warn!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, router(paths))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web UI server exited unexpectedly")?;

    println!("Server stopped");
    Ok(())
}

fn router(paths: ClaudePaths) -> Router {
    let state = UiState {
        paths: Arc::new(paths),
    };

    Router::new()
        .route("/", get(index))
        .route("/api/profiles", get(list_profiles).post(save_profiles))
        .route("/api/profiles/{key}", delete(delete_profile))
        .route("/api/current", get(current_profile))
        .route("/api/switch/{key}", post(switch))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn list_profiles(State(state): State<UiState>) -> ApiResult<Json<Value>> {
    let profiles = blocking(&state, |paths| ProfileStore::new(paths).get_profiles()).await?;
    Ok(Json(Value::Object(profiles)))
}

async fn current_profile(State(state): State<UiState>) -> ApiResult<Json<Value>> {
    let resolved = blocking(&state, |paths| {
        let Some(active) = read_active_settings(paths)? else {
            return Ok(None);
        };
        let profiles = ProfileStore::new(paths).get_profiles()?;
        let current = resolve_active(&profiles, &active)
            .map(|found| found.key)
            .unwrap_or_default();
        Ok(Some((current, active)))
    })
    .await?;

    let Some((current, active)) = resolved else {
        return Ok(Json(json!({ "current": "", "settings": {} })));
    };
    Ok(Json(json!({ "current": current, "settings": active })))
}

async fn switch(State(state): State<UiState>, Path(key): Path<String>) -> ApiResult<Json<Value>> {
    let outcome = blocking(&state, move |paths| switch_profile(paths, &key)).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Switched to profile: {}", outcome.key),
    })))
}

async fn save_profiles(
    State(state): State<UiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = payload?;
    let Value::Object(profiles) = body else {
        return Err(ApiError::BadRequest(
            "Request body must be a JSON object of profiles".to_string(),
        ));
    };

    let count = profiles.len();
    blocking(&state, move |paths| {
        ProfileStore::new(paths).save_profiles(&profiles)
    })
    .await?;
    info!(count, "profiles saved from web ui");
    Ok(Json(json!({ "success": true, "message": "Profiles saved" })))
}

async fn delete_profile(
    State(state): State<UiState>,
    Path(key): Path<String>,
) -> ApiResult<Json<Value>> {
    let removed = key.clone();
    blocking(&state, move |paths| {
        ProfileStore::new(paths).remove_profile(&removed)
    })
    .await?;
    info!(profile = %key, "profile deleted from web ui");
    Ok(Json(json!({
        "success": true,
        "message": format!("Deleted profile: {key}"),
    })))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("shutting down web ui");
    println!("\nShutting down server...");
}

fn open_url(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };
    command.arg(url).spawn().map(|_| ())
}
