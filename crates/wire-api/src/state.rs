//! # Application State
//!
//! Shared state for the axum application: configuration and the payment
//! executor with its injected store. Nothing here is package-level mutable
//! state; everything the handlers need travels inside `AppState`.

use std::sync::Arc;
use wire_core::{BoxedPaymentStore, PaymentExecutor};
use wire_store::PgPaymentStore;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Postgres connection string
    pub database_url: String,
    /// Upper bound on pooled store connections
    pub max_db_connections: u32,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables.
    ///
    /// Required env vars:
    /// - `DATABASE_URL`
    ///
    /// Optional: `HOST`, `PORT`, `MAX_DB_CONNECTIONS`, `ENVIRONMENT`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL not set"))?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_url,
            max_db_connections: std::env::var("MAX_DB_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(10),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment transaction executor
    pub executor: PaymentExecutor,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create an `AppState` backed by Postgres.
    ///
    /// Builds the connection pool here, once, and injects it; the executor
    /// never manages connection lifecycle itself.
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store = PgPaymentStore::connect(&config.database_url, config.max_db_connections)
            .await
            .map_err(|e| anyhow::anyhow!("failed to initialize store: {e}"))?;

        Ok(Self::with_store(Arc::new(store), config))
    }

    /// Create an `AppState` over any store implementation (used by tests
    /// with the in-memory store).
    pub fn with_store(store: BoxedPaymentStore, config: AppConfig) -> Self {
        Self {
            executor: PaymentExecutor::new(store),
            config,
        }
    }
}
