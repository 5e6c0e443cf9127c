//! # dropln-api
//!
//! HTTP API layer for Dropln built on Axum.
//!
//! Provides the file-tree REST endpoints, bearer-token extraction, request
//! logging and CORS middleware, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use error::ApiError;
pub use state::AppState;
