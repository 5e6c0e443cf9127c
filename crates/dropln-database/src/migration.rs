//! Schema migrations embedded from `migrations/`.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use dropln_core::error::{AppError, ErrorKind};
use dropln_core::result::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Version and description of every embedded migration, oldest first.
pub fn embedded() -> Vec<(i64, String)> {
    MIGRATOR
        .iter()
        .map(|m| (m.version, m.description.to_string()))
        .collect()
}

/// Apply whatever the `files` schema is still missing.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Schema migration failed", e)
    })?;

    info!(migrations = MIGRATOR.iter().count(), "Schema is up to date");
    Ok(())
}
