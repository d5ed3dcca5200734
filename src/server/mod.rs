//! HTTP API server
//!
//! Serves the store-backed content API, the password-gated admin API,
//! and static files from the public (snapshot) directory. Optionally
//! watches the content directory and re-syncs the store when the JSON
//! files change.

pub mod admin;

use anyhow::Result;
use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::loader::SITE_FILE;
use crate::content::{ContactMessageData, ContentDir};
use crate::store::{sync, ContentStore};
use crate::Folio;

/// Shared server state
pub struct AppState {
    pub store: ContentStore,
    pub content: ContentDir,
    /// Bearer token for the admin API; None disables it
    pub admin_password: Option<String>,
}

/// Handler error, rendered as a JSON message body
pub(crate) enum ApiError {
    Message(StatusCode, &'static str),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Message(status, message) => {
                (status, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!("Request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

/// Start the server: sync the store, then serve
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool) -> Result<()> {
    let content = folio.content();
    let store = ContentStore::open(&folio.db_path).await?;
    sync::sync_from_json(&store, &content).await?;

    let admin_password = std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty());
    if admin_password.is_none() {
        tracing::warn!("ADMIN_PASSWORD is not set; admin API is disabled");
    }

    let state = Arc::new(AppState {
        store: store.clone(),
        content: content.clone(),
        admin_password,
    });
    let app = router(state, &folio.public_dir);

    if watch {
        let watch_content = content.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_and_sync(watch_content, store).await {
                tracing::error!("Content watcher error: {}", e);
            }
        });
    }

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching {} for content changes...", content.path().display());
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router over the given state and public directory
pub fn router(state: Arc<AppState>, public_dir: &Path) -> Router {
    Router::new()
        .route("/api/site", get(get_site))
        .route("/api/quotes", get(get_quotes))
        .route("/api/quotes/random", get(get_random_quote))
        .route("/api/essays", get(get_essays))
        .route("/api/essays/:id", get(get_essay))
        .route("/api/music", get(get_music))
        .route("/api/sections", get(get_sections))
        .route("/api/sections/:slug", get(get_section))
        .route("/api/contact", post(post_contact))
        .merge(admin::routes())
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Watch the content directory and re-sync the store on changes
async fn watch_and_sync(content: ContentDir, store: ContentStore) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(16);

    // Debounce editor save bursts into one sync
    let mut debouncer = new_debouncer(Duration::from_millis(500), move |events| {
        let _ = tx.blocking_send(events);
    })?;
    debouncer
        .watcher()
        .watch(content.path(), RecursiveMode::NonRecursive)?;
    tracing::debug!("Watching: {:?}", content.path());

    while let Some(result) = rx.recv().await {
        match result {
            Ok(events) => {
                let relevant = events
                    .iter()
                    .any(|e| e.path.extension().map_or(false, |ext| ext == "json"));
                if !relevant {
                    continue;
                }

                tracing::info!("Content files changed, re-syncing store");
                if let Err(e) = sync::sync_from_json(&store, &content).await {
                    tracing::error!("Re-sync failed: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
            }
        }
    }

    Ok(())
}

// API handlers

async fn get_site(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    // Read per request so admin edits surface without a restart
    Ok(Json(state.content.read_value(SITE_FILE)?))
}

async fn get_quotes(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.quotes().await?))
}

async fn get_random_quote(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = state
        .store
        .random_quote()
        .await?
        .ok_or(ApiError::Message(StatusCode::NOT_FOUND, "No quotes found"))?;
    Ok(Json(quote))
}

async fn get_essays(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.essays().await?))
}

async fn get_essay(
    State(state): State<Arc<AppState>>,
    UrlPath(id): UrlPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::Message(StatusCode::BAD_REQUEST, "Invalid ID"))?;
    let essay = state
        .store
        .essay(id)
        .await?
        .ok_or(ApiError::Message(StatusCode::NOT_FOUND, "Essay not found"))?;
    Ok(Json(essay))
}

async fn get_music(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.music().await?))
}

async fn get_sections(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.sections().await?))
}

async fn get_section(
    State(state): State<Arc<AppState>>,
    UrlPath(slug): UrlPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let section = state.store.section(&slug).await?.ok_or(ApiError::Message(
        StatusCode::NOT_FOUND,
        "Section not found",
    ))?;
    Ok(Json(section))
}

async fn post_contact(
    State(state): State<Arc<AppState>>,
    Json(data): Json<ContactMessageData>,
) -> Result<impl IntoResponse, ApiError> {
    if data.name.trim().is_empty() || data.email.trim().is_empty() || data.message.trim().is_empty()
    {
        return Err(ApiError::Message(
            StatusCode::BAD_REQUEST,
            "Please fill in all required fields.",
        ));
    }

    state.store.insert_contact_message(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Thank you for your message. We will be in touch." })),
    ))
}
