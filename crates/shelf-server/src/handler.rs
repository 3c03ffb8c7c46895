use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shelf_types::{Library, Statistics};

use crate::error::ServerResult;
use crate::state::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> ServerResult<Json<serde_json::Value>> {
    let catalog = state.catalog()?;
    Ok(Json(json!({
        "name": "shelf-server",
        "version": env!("CARGO_PKG_VERSION"),
        "library": catalog.location(),
        "load_status": catalog.load_status().to_string(),
    })))
}

/// All books, in insertion order.
pub async fn books_handler(State(state): State<AppState>) -> ServerResult<Json<Library>> {
    Ok(Json(state.catalog()?.library().clone()))
}

pub async fn stats_handler(State(state): State<AppState>) -> ServerResult<Json<Statistics>> {
    Ok(Json(state.catalog()?.statistics()))
}
