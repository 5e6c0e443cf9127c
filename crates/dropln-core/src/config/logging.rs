//! Log output settings.

use serde::{Deserialize, Serialize};

/// Shape of each log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    Json,
    /// Multi-line human-readable output.
    #[default]
    Pretty,
}

/// Log filter and format. `RUST_LOG` overrides `level` when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"dropln_service=debug,info"`.
    pub level: String,
    /// Line format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}
