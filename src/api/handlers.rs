//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::cache::{AlphanumericValues, CacheEngine, Field, PartialEntry, SystemClock};
use crate::error::Result;
use crate::storage::MemoryStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache engine; clones share storage, clock, and generator
    pub engine: CacheEngine,
}

impl AppState {
    /// Creates a new AppState over the given engine.
    pub fn new(engine: CacheEngine) -> Self {
        Self { engine }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires the engine to the in-memory store, the system clock, and the
    /// default alphanumeric value generator.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let engine = CacheEngine::new(
            Arc::new(MemoryStore::new()),
            Arc::new(SystemClock),
            Arc::new(AlphanumericValues::default()),
            config.cache_size,
            config.entry_ttl_ms,
        );
        Self::new(engine)
    }
}

/// Query parameters for GET /cache
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Comma-separated field names to project
    #[serde(default)]
    pub properties: Option<String>,
}

impl ListParams {
    /// Parses the comma-separated property list into fields.
    ///
    /// Blank segments are skipped; unknown names are rejected. Whether the
    /// resulting list may be empty is the engine's call, not ours.
    fn fields(&self) -> Result<Vec<Field>> {
        self.properties
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse())
            .collect()
    }
}

/// Handler for GET /cache/:key
///
/// Returns the cached value, creating the entry on a miss and regenerating
/// it when stale. Always responds 200 on a healthy store.
pub async fn get_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<String> {
    state.engine.get(&key).await
}

/// Handler for GET /cache?properties=a,b
///
/// Lists all entries projected to the requested fields.
pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PartialEntry>>> {
    let fields = params.fields()?;
    let entries = state.engine.find_all(&fields).await?;
    Ok(Json(entries))
}

/// Handler for PUT /cache/:key
///
/// Upserts the raw request body as the value for `key`.
pub async fn put_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
    value: String,
) -> Result<StatusCode> {
    state.engine.set(&key, value, false).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /cache/:key
///
/// Deletes the entry for `key`; deleting an absent key also responds 204.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode> {
    state.engine.remove(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /cache
///
/// Clears every entry.
pub async fn clear_entries(State(state): State<AppState>) -> Result<StatusCode> {
    state.engine.remove_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
