use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

/// HTTP service settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    /// Interface to bind (e.g. `"0.0.0.0"` for all interfaces)
    pub host: String,
    pub port: u16,
    /// Verbose request and scoring logs
    pub debug: bool,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
    /// Per-request deadline, e.g. "30s" or "2m"
    pub request_timeout: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8050,
            debug: true,
            max_upload_bytes: 10 * 1024 * 1024,
            request_timeout: "30s".to_string(),
        }
    }
}
