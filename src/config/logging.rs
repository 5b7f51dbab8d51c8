//! Logging configuration

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Modules that accept their own level under `[logging.modules]`.
pub const LOG_MODULES: &[&str] = &[
    "api",
    "cli",
    "completion",
    "extract",
    "ideas",
    "plan",
    "progress",
    "session",
];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable, multi-line events
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::UnknownVariant {
                setting: "logging.format",
                value: s.to_string(),
                expected: "pretty, json",
            }),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Per-module levels, e.g. `plan = "debug"`. Keys come from [`LOG_MODULES`].
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub modules: BTreeMap<String, String>,
    /// Log the opening characters of every section prompt at debug level.
    /// Business descriptions may be confidential.
    pub prompt_previews: bool,
    pub prompt_preview_chars: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            modules: BTreeMap::new(),
            prompt_previews: false,
            prompt_preview_chars: 100,
        }
    }
}

impl LoggingConfig {
    /// `EnvFilter` directives: the base level, then one directive per module.
    pub fn filter_directives(&self) -> String {
        let mut directives = self.level.clone();
        for (module, level) in &self.modules {
            directives.push_str(&format!(",plancraft::{module}={level}"));
        }
        directives
    }

    /// Preview length for prompt logging, or `None` when previews are off.
    pub fn preview_limit(&self) -> Option<usize> {
        (self.prompt_previews && self.prompt_preview_chars > 0).then_some(self.prompt_preview_chars)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if LevelFilter::from_str(&self.level).is_err() {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("'{}' is not a log level", self.level),
            ));
        }
        for (module, level) in &self.modules {
            if !LOG_MODULES.contains(&module.as_str()) {
                return Err(ConfigError::UnknownVariant {
                    setting: "logging.modules",
                    value: module.clone(),
                    expected: "api, cli, completion, extract, ideas, plan, progress, session",
                });
            }
            if LevelFilter::from_str(level).is_err() {
                return Err(ConfigError::invalid(
                    "logging.modules",
                    format!("'{level}' is not a log level for module '{module}'"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.preview_limit(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(ConfigError::UnknownVariant { setting: "logging.format", .. })
        ));
    }

    #[test]
    fn test_filter_directives_scope_modules_to_crate() {
        let toml = r#"
        level = "warn"
        [modules]
        session = "trace"
        plan = "debug"
        "#;
        let config: LoggingConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.filter_directives(),
            "warn,plancraft::plan=debug,plancraft::session=trace"
        );
    }

    #[test]
    fn test_preview_limit_needs_opt_in() {
        let mut config = LoggingConfig {
            prompt_previews: true,
            ..LoggingConfig::default()
        };
        assert_eq!(config.preview_limit(), Some(100));

        config.prompt_preview_chars = 0;
        assert_eq!(config.preview_limit(), None);
    }

    #[test]
    fn test_validate_rejects_unknown_module_and_level() {
        let mut config = LoggingConfig::default();
        config.modules.insert("routing".to_string(), "debug".to_string());
        assert_eq!(
            config.validate().unwrap_err().field(),
            Some("logging.modules")
        );

        let config = LoggingConfig {
            level: "loud".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().field(), Some("logging.level"));
    }
}
