//! HTTP listener and browser-access settings.

use serde::{Deserialize, Serialize};

/// Where the API listens and which dashboards may call it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Cross-origin access for the browser dashboard.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// `host:port` as passed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors: CorsConfig::default(),
        }
    }
}

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins, or a single `"*"` to allow any (development only).
    pub allowed_origins: Vec<String>,
    /// How long browsers may cache a preflight answer.
    pub max_age_seconds: u64,
}

impl CorsConfig {
    /// Whether the wildcard origin is configured.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o.trim() == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age_seconds: 600,
        }
    }
}
