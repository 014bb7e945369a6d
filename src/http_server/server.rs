//! # HTTP Server
//!
//! Binds the character routes to a socket and serves them.
//!
//! The store is injected at construction so tests can build isolated
//! servers over isolated stores.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::observability::Logger;
use crate::store::CharacterStore;

use super::character_routes::{character_routes, CharactersState};
use super::config::HttpServerConfig;

/// HTTP server for the character roster
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `store` with default configuration
    pub fn new(store: Arc<CharacterStore>) -> Self {
        Self::with_config(HttpServerConfig::default(), store)
    }

    /// Create a server over `store` with custom configuration
    pub fn with_config(config: HttpServerConfig, store: Arc<CharacterStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the router with all endpoints
    fn build_router(config: &HttpServerConfig, store: Arc<CharacterStore>) -> Router {
        let state = Arc::new(CharactersState::new(store, config));

        // Permissive CORS when no origins are configured (development)
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        character_routes(state).layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info("SERVER_STARTED", &[("addr", &addr.to_string())]);

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
