//! Success bodies. Nodes and node lists are returned bare, as the dashboard
//! reads them.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// `201 Created` with the new node as the body.
#[derive(Debug, Clone)]
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// `"ok"`, or `"degraded"` when the node repository does not answer.
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the node repository answered.
    pub repository: bool,
    /// Which object store backend is configured.
    pub object_store: String,
}
