//! Character HTTP Routes
//!
//! Endpoints for listing, fetching, inserting, and patching characters,
//! plus the health check.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::store::CharacterStore;

use super::config::HttpServerConfig;
use super::errors::{ApiError, ApiResult};

// ==================
// Shared State
// ==================

/// State shared across character handlers
pub struct CharactersState {
    pub store: Arc<CharacterStore>,
    /// Page size when a list request omits `limit`
    pub default_limit: usize,
    /// Offset when a list request omits `skip`
    pub default_skip: usize,
}

impl CharactersState {
    pub fn new(store: Arc<CharacterStore>, config: &HttpServerConfig) -> Self {
        Self {
            store,
            default_limit: config.default_limit,
            default_skip: config.default_skip,
        }
    }
}

// ==================
// Request Types
// ==================

/// Raw pagination query parameters.
///
/// Both arrive as strings so the handler owns integer parsing: a value
/// that fails to parse must 400 before the store is called, and the
/// default must apply only when the parameter is absent.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<String>,
    pub skip: Option<String>,
}

// ==================
// Character Routes
// ==================

/// Create character routes
pub fn character_routes(state: Arc<CharactersState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/characters",
            get(list_characters_handler).post(insert_character_handler),
        )
        .route(
            "/characters/{id}",
            get(get_character_handler).patch(update_character_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Parse an optional pagination parameter, falling back to `default`
/// when absent.
///
/// Parsing as `usize` also rejects negative values, which the contract
/// treats as a caller error.
fn parse_page_param(name: &str, raw: Option<&str>, default: usize) -> ApiResult<usize> {
    match raw {
        None => Ok(default),
        Some(s) => s.parse::<usize>().map_err(|_| {
            ApiError::InvalidQueryParam(format!("{} must be a non-negative integer, got '{}'", name, s))
        }),
    }
}

// ==================
// Handlers
// ==================

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /characters — one page of the roster, in insertion order.
async fn list_characters_handler(
    State(state): State<Arc<CharactersState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    let limit = parse_page_param("limit", query.limit.as_deref(), state.default_limit)?;
    let skip = parse_page_param("skip", query.skip.as_deref(), state.default_skip)?;

    let page = state.store.list(skip, limit)?;
    Ok(Json(page))
}

/// GET /characters/{id} — first record with a matching id.
async fn get_character_handler(
    State(state): State<Arc<CharactersState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let record = state.store.get_by_id(id)?;
    Ok(Json(record))
}

/// POST /characters — insert a full record.
async fn insert_character_handler(
    State(state): State<Arc<CharactersState>>,
    Json(candidate): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let stored = state.store.insert(candidate)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// PATCH /characters/{id} — shallow-merge a partial record.
async fn update_character_handler(
    State(state): State<Arc<CharactersState>>,
    Path(id): Path<i64>,
    Json(patch): Json<Value>,
) -> ApiResult<Json<Value>> {
    let updated = state.store.update(id, patch)?;
    Ok(Json(updated))
}
