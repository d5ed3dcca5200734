//! Admin API - password-gated, in-place content editing
//!
//! Every write overwrites one JSON content file and re-derives the
//! store from the files, so the admin panel edits the same source of
//! truth a text editor would. The bearer token is compared against the
//! configured admin password; nothing more.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::content::loader::{ESSAYS_FILE, MUSIC_FILE, QUOTES_FILE, SECTIONS_FILE, SITE_FILE};
use crate::store::sync;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/site", get(get_site).put(put_site))
        .route("/api/admin/quotes", get(get_quotes).put(put_quotes))
        .route("/api/admin/essays", get(get_essays).put(put_essays))
        .route("/api/admin/music", get(get_music).put(put_music))
        .route("/api/admin/sections", get(get_sections).put(put_sections))
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Value>, ApiError> {
    match &state.admin_password {
        Some(password) if *password == body.password => Ok(Json(json!({ "success": true }))),
        _ => Err(ApiError::Message(
            StatusCode::UNAUTHORIZED,
            "Wrong password",
        )),
    }
}

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match (&state.admin_password, token) {
        (Some(password), Some(token)) if password == token => Ok(()),
        _ => Err(ApiError::Message(StatusCode::UNAUTHORIZED, "Unauthorized")),
    }
}

fn read_resource(state: &AppState, headers: &HeaderMap, file: &str) -> Result<Json<Value>, ApiError> {
    require_admin(state, headers)?;
    Ok(Json(state.content.read_value(file)?))
}

async fn write_resource(
    state: &AppState,
    headers: &HeaderMap,
    file: &str,
    body: Value,
) -> Result<Json<Value>, ApiError> {
    require_admin(state, headers)?;
    state.content.write_value(file, &body)?;
    sync::sync_from_json(&state.store, &state.content).await?;
    Ok(Json(json!({ "success": true })))
}

async fn get_site(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    read_resource(&state, &headers, SITE_FILE)
}

async fn put_site(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    write_resource(&state, &headers, SITE_FILE, body).await
}

async fn get_quotes(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    read_resource(&state, &headers, QUOTES_FILE)
}

async fn put_quotes(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    write_resource(&state, &headers, QUOTES_FILE, body).await
}

async fn get_essays(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    read_resource(&state, &headers, ESSAYS_FILE)
}

async fn put_essays(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    write_resource(&state, &headers, ESSAYS_FILE, body).await
}

async fn get_music(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    read_resource(&state, &headers, MUSIC_FILE)
}

async fn put_music(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    write_resource(&state, &headers, MUSIC_FILE, body).await
}

async fn get_sections(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    read_resource(&state, &headers, SECTIONS_FILE)
}

async fn put_sections(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    write_resource(&state, &headers, SECTIONS_FILE, body).await
}
