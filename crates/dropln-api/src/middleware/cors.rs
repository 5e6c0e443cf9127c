//! Cross-origin access for the browser dashboard.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use dropln_core::config::CorsConfig;

/// The dashboard only ever reads, creates and toggles.
const METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PATCH, Method::OPTIONS];

/// CORS layer for `config`. Unparseable origins are skipped with a warning.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins = config.allowed_origins.iter().filter_map(|o| {
            HeaderValue::from_str(o.trim())
                .inspect_err(|_| warn!(origin = %o, "Ignoring invalid CORS origin"))
                .ok()
        });
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(METHODS)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age_seconds))
}
