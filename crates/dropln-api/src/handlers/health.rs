//! Liveness endpoint.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthReport;
use crate::state::AppState;

/// GET /api/health (no auth)
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let repository = match state.nodes.health_check().await {
        Ok(up) => up,
        Err(e) => {
            tracing::warn!(error = %e, "Node repository health check failed");
            false
        }
    };

    Json(HealthReport {
        status: if repository { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        repository,
        object_store: state.objects.provider_type().to_string(),
    })
}
