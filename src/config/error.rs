//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a [`PlanConfig`](super::PlanConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A setting is present but out of range. `field` is the dotted TOML path.
    #[error("invalid value for '{field}': {message}")]
    Validation { field: &'static str, message: String },

    /// A string setting that names one of a fixed set of choices.
    #[error("unknown {setting} '{value}' (expected one of: {expected})")]
    UnknownVariant {
        setting: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Dotted path of the offending setting, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Validation { field, .. } => Some(field),
            ConfigError::UnknownVariant { setting, .. } => Some(setting),
            _ => None,
        }
    }
}
