//! # Roster Server
//!
//! JSON API and HTML UI over the Roster database.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          roster-server                                  │
//! │                                                                         │
//! │  HTTP ──► axum Router                                                  │
//! │            ├── /api/...      api.rs   JSON in, JSON out                │
//! │            ├── /, /queries/  web.rs   HTML forms and tables            │
//! │            └── /health                                                 │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │            Arc<AppState> { db: Database }                              │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │            roster-db repositories ──► SQLite                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`]: `server.toml` plus `ROSTER_*` environment variables.

pub mod api;
pub mod config;
pub mod error;
pub mod web;

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use roster_db::Database;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorCode};

/// Shared application state.
///
/// The database handle is the only state shared between handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Arc<Self> {
        Arc::new(AppState { db })
    }
}

/// Builds the full router: JSON API under `/api`, HTML at the root.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api::routes())
        .merge(web::routes())
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Health check endpoint.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.db.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
    }
}

/// Binds `bind_addr` and serves until `shutdown` resolves.
pub async fn serve<F>(state: Arc<AppState>, bind_addr: &str, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", bind_addr, e))?;

    info!(addr = %bind_addr, "HTTP server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
