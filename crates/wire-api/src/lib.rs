//! # wire-api
//!
//! HTTP API layer for wirepay-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The payment-creation endpoint
//! - Configuration and bootstrap (pool construction, logging, shutdown)
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/payments` | Create a payment |
//! | GET | `/health` | Health check |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
