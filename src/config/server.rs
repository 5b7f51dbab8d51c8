//! HTTP server configuration

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single `/v1/plans` request, including every section.
    pub request_timeout_seconds: u64,
    /// Maximum accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// How long a caller's session controller is kept once nothing is running.
    pub session_idle_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_seconds: 600,
            max_body_bytes: 1024 * 1024,
            session_idle_seconds: 900,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout_seconds, 600);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert_eq!(config.session_idle_seconds, 900);
    }
}
