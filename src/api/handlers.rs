//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::TieredCache;
use crate::config::Config;
use crate::error::{ApiError, Result, StoreError};
use crate::models::{
    ClearAllResponse, ClearResponse, GetResponse, HealthResponse, SetRequest, SetResponse,
    StatsResponse,
};
use crate::persist::{FileStore, MemoryStore, PersistStore};

/// Application state shared across all handlers.
///
/// The cache itself is synchronous; the RwLock serializes handler access so
/// each cache operation stays atomic with respect to the others.
#[derive(Clone)]
pub struct AppState {
    /// Shared tiered cache over JSON payloads
    pub cache: Arc<RwLock<TieredCache<Value>>>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: TieredCache<Value>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// An empty `data_dir` selects the in-memory durable tier; anything else
    /// opens a file-backed tier at that path.
    pub fn from_config(config: &Config) -> std::result::Result<Self, StoreError> {
        let persist: Box<dyn PersistStore> = if config.data_dir.is_empty() {
            Box::new(MemoryStore::new())
        } else {
            Box::new(FileStore::new(&config.data_dir)?)
        };

        let cache = TieredCache::new(persist, config.capacity, config.default_ttl());
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /set
///
/// Caches a JSON payload under a key with an optional TTL in minutes.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl_minutes.map(|m| Duration::from_secs(m * 60));

    let mut cache = state.cache.write().await;
    cache.set(&req.key, req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a cached payload; 404 when nothing usable is cached.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a successful lookup refreshes recency, a stale one prunes
    let mut cache = state.cache.write().await;
    let value = cache.get(&key).ok_or(ApiError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
///
/// Clears a key from both tiers. Idempotent: clearing an absent key is a
/// success.
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    cache.clear(&key);

    Json(ClearResponse::new(key))
}

/// Handler for POST /clear
///
/// Empties the fast tier and wipes the durable tier's whole namespace.
pub async fn clear_all_handler(State(state): State<AppState>) -> Json<ClearAllResponse> {
    let mut cache = state.cache.write().await;
    let dropped = cache.len();
    cache.clear_all();

    Json(ClearAllResponse::new(dropped))
}

/// Handler for GET /stats
///
/// Returns a fast-tier snapshot with performance counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(cache.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
