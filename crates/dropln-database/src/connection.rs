//! PostgreSQL pool setup.
//!
//! Only used when `database.url` names a PostgreSQL server; the `memory://`
//! backend never opens a pool.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use dropln_core::config::DatabaseConfig;
use dropln_core::config::database::mask_password;
use dropln_core::error::{AppError, ErrorKind};
use dropln_core::result::AppResult;

/// Open a pool against the configured server.
pub async fn connect(config: &DatabaseConfig) -> AppResult<PgPool> {
    if config.is_memory() {
        return Err(AppError::configuration(
            "database.url selects the in-memory repository, there is no server to connect to",
        ));
    }

    let url = mask_password(&config.url);
    info!(url = %url, max_connections = config.max_connections, "Opening PostgreSQL pool");

    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, format!("Cannot reach {url}"), e))?;

    Ok(pool)
}

/// Round-trip a trivial query.
pub async fn ping(pool: &PgPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Database ping failed", e))
}
