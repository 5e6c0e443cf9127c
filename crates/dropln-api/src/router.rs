//! Route definitions for the Dropln HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and text fields on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.storage.max_upload_size_bytes as usize + MULTIPART_OVERHEAD;

    let api_routes = Router::new()
        .merge(file_routes())
        .merge(folder_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// File listing, upload and flag toggles
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::files::list_files))
        .route("/files/starred", get(handlers::files::list_starred))
        .route("/files/trash", get(handlers::files::list_trash))
        .route("/files/upload", post(handlers::files::upload_file))
        .route("/files/{id}", get(handlers::files::get_file))
        .route("/files/{id}/star", patch(handlers::files::toggle_star))
        .route("/files/{id}/delete", patch(handlers::files::toggle_deleted))
}

/// Folder creation
fn folder_routes() -> Router<AppState> {
    Router::new().route("/folders/create", post(handlers::folders::create_folder))
}

/// Health check (no auth)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
