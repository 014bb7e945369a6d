//! # rosterdb HTTP Server Module
//!
//! Axum server exposing the character roster.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `GET /characters` - Paginated list (`limit`, `skip` query params)
//! - `GET /characters/{id}` - Lookup by id
//! - `POST /characters` - Insert a full record
//! - `PATCH /characters/{id}` - Shallow-merge a partial record

pub mod character_routes;
pub mod config;
pub mod errors;
pub mod server;

pub use character_routes::{character_routes, CharactersState};
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
