//! One log line per request.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, warn};

/// Logs method, path, status and latency. Server errors log at `warn`,
/// client rejections at `debug`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    let code = status.as_u16();

    if status.is_server_error() {
        warn!(%method, %path, status = code, latency_ms, "Request failed");
    } else if status.is_client_error() {
        debug!(%method, %path, status = code, latency_ms, "Request rejected");
    } else {
        info!(%method, %path, status = code, latency_ms, "Request served");
    }

    response
}
