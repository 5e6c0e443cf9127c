//! Wires configuration into state, and state into the router.

use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use dropln_auth::jwt::JwtIdentityProvider;
use dropln_core::config::AppConfig;
use dropln_core::result::AppResult;
use dropln_database::connection;
use dropln_database::migration::run_migrations;
use dropln_database::repositories::{MemoryNodeRepository, NodeRepository, PgNodeRepository};
use dropln_storage::build_object_store;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Builds the application state from configuration.
///
/// Connects to PostgreSQL and applies pending migrations, unless the
/// database URL is `memory://`.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    // ── Step 1: Node repository ──────────────────────────────────
    let nodes: Arc<dyn NodeRepository> = if config.database.is_memory() {
        warn!("Using the in-memory node repository, data is lost on restart");
        Arc::new(MemoryNodeRepository::new())
    } else {
        let pool = connection::connect(&config.database).await?;
        run_migrations(&pool).await?;
        Arc::new(PgNodeRepository::new(pool))
    };

    // ── Step 2: Object store ─────────────────────────────────────
    let objects = build_object_store(&config.storage).await?;

    // ── Step 3: Identity provider ────────────────────────────────
    let identity = Arc::new(JwtIdentityProvider::new(&config.auth)?);
    info!(algorithm = ?config.auth.algorithm, "Identity provider initialized");

    Ok(AppState::new(config, nodes, objects, identity))
}
