//! Configuration module for Plancraft
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PLANCRAFT_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use plancraft::config::PlanConfig;
//!
//! let config = PlanConfig::default();
//! assert_eq!(config.server.port, 8080);
//!
//! let toml = r#"
//! [generation]
//! retry_delay_ms = 250
//! "#;
//! let config: PlanConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.generation.retry_delay_ms, 250);
//! ```

pub mod error;
pub mod generation;
pub mod logging;
pub mod provider;
pub mod server;

pub use error::ConfigError;
pub use generation::{GenerationConfig, ProgressConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use provider::{ProviderConfig, ProviderKind};
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the CLI and HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlanConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Completion service selection and models
    pub provider: ProviderConfig,
    /// Retry/degradation policy
    pub generation: GenerationConfig,
    /// Progress estimator tuning
    pub progress: ProgressConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl PlanConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                    path: p.to_path_buf(),
                    source,
                })?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: p.to_path_buf(),
                    message: e.to_string(),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("PLANCRAFT_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("PLANCRAFT_HOST") {
            self.server.host = host;
        }

        if let Ok(kind) = std::env::var("PLANCRAFT_PROVIDER") {
            if let Ok(k) = kind.parse() {
                self.provider.kind = k;
            }
        }
        if let Ok(url) = std::env::var("PLANCRAFT_PROVIDER_URL") {
            self.provider.base_url = url;
        }

        if let Ok(level) = std::env::var("PLANCRAFT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PLANCRAFT_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "port must be non-zero"));
        }

        if self.provider.kind != ProviderKind::Offline {
            if self.provider.base_url.is_empty() {
                return Err(ConfigError::invalid("provider.base_url", "URL cannot be empty"));
            }
            if self.provider.standard_model.is_empty() {
                return Err(ConfigError::invalid(
                    "provider.standard_model",
                    "model name cannot be empty",
                ));
            }
            if self.provider.enhanced_model.is_empty() {
                return Err(ConfigError::invalid(
                    "provider.enhanced_model",
                    "model name cannot be empty",
                ));
            }
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(ConfigError::invalid(
                "generation.temperature",
                "must be between 0.0 and 2.0",
            ));
        }
        if self.generation.degraded_description_chars == 0 {
            return Err(ConfigError::invalid(
                "generation.degraded_description_chars",
                "must be greater than zero",
            ));
        }

        if self.progress.tick_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "progress.tick_interval_ms",
                "must be greater than zero",
            ));
        }
        if !(self.progress.tick_fraction > 0.0 && self.progress.tick_fraction <= 1.0) {
            return Err(ConfigError::invalid("progress.tick_fraction", "must be in (0.0, 1.0]"));
        }

        if self.server.session_idle_seconds == 0 {
            return Err(ConfigError::invalid(
                "server.session_idle_seconds",
                "must be greater than zero",
            ));
        }

        self.logging.validate()
    }
}
