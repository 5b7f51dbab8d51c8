//! Completion provider configuration

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which completion service implementation to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Any OpenAI-compatible `/v1/chat/completions` endpoint.
    #[default]
    OpenAI,
    /// Anthropic Messages API.
    Anthropic,
    /// No network access; every call declines and sections fall back.
    Offline,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAI),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "offline" => Ok(ProviderKind::Offline),
            _ => Err(ConfigError::UnknownVariant {
                setting: "provider.kind",
                value: s.to_string(),
                expected: "openai, anthropic, offline",
            }),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Offline => "offline",
        };
        f.write_str(name)
    }
}

/// Completion provider configuration.
///
/// # Example
///
/// ```toml
/// [provider]
/// kind = "openai"
/// base_url = "https://api.openai.com"
/// api_key_env = "OPENAI_API_KEY"
/// standard_model = "gpt-4o-mini"
/// enhanced_model = "gpt-4o"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: String,
    /// Environment variable holding the API key. Never store the key itself.
    pub api_key_env: Option<String>,
    /// Model used for the `standard` tier and every degraded retry.
    pub standard_model: String,
    /// Model used for the `enhanced` tier.
    pub enhanced_model: String,
    /// Client-side timeout for a single completion call.
    pub timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::OpenAI,
            base_url: "https://api.openai.com".to_string(),
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            standard_model: "gpt-4o-mini".to_string(),
            enhanced_model: "gpt-4o".to_string(),
            timeout_seconds: 120,
        }
    }
}
