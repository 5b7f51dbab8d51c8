//! Completion service factory.

use super::{
    anthropic::AnthropicService, offline::OfflineService, openai::OpenAIService, CompletionError,
    CompletionService, ModelMap,
};
use crate::config::{ProviderConfig, ProviderKind};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Create a completion service from provider configuration.
///
/// The API key is read from the environment variable named by
/// `api_key_env`. OpenAI-compatible providers may run without a key (local
/// gateways); Anthropic requires one.
///
/// # Examples
///
/// ```
/// use plancraft::completion::factory::create_service;
/// use plancraft::config::{ProviderConfig, ProviderKind};
/// use std::sync::Arc;
///
/// let config = ProviderConfig {
///     kind: ProviderKind::Offline,
///     ..ProviderConfig::default()
/// };
/// let service = create_service(&config, Arc::new(reqwest::Client::new())).unwrap();
/// assert_eq!(service.name(), "offline");
/// ```
pub fn create_service(
    config: &ProviderConfig,
    client: Arc<Client>,
) -> Result<Arc<dyn CompletionService>, CompletionError> {
    let models = ModelMap {
        standard: config.standard_model.clone(),
        enhanced: config.enhanced_model.clone(),
    };
    let timeout = Duration::from_secs(config.timeout_seconds);

    match config.kind {
        ProviderKind::Offline => Ok(Arc::new(OfflineService)),
        ProviderKind::OpenAI => {
            let api_key = read_api_key(config.api_key_env.as_deref())?.unwrap_or_default();
            Ok(Arc::new(OpenAIService::new(
                config.base_url.clone(),
                api_key,
                models,
                timeout,
                client,
            )))
        }
        ProviderKind::Anthropic => {
            let api_key = read_api_key(config.api_key_env.as_deref())?.ok_or_else(|| {
                CompletionError::Configuration(
                    "Anthropic provider requires 'api_key_env'".to_string(),
                )
            })?;
            Ok(Arc::new(AnthropicService::new(
                config.base_url.clone(),
                api_key,
                models,
                timeout,
                client,
            )))
        }
    }
}

/// Build the shared HTTP client and the configured service.
pub fn create_service_with_client(
    config: &ProviderConfig,
) -> Result<Arc<dyn CompletionService>, CompletionError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| CompletionError::Configuration(format!("Failed to create HTTP client: {e}")))?;
    create_service(config, Arc::new(client))
}

fn read_api_key(env_var: Option<&str>) -> Result<Option<String>, CompletionError> {
    match env_var {
        None => Ok(None),
        Some(name) => std::env::var(name).map(Some).map_err(|e| {
            CompletionError::Configuration(format!(
                "Failed to read API key from env var '{}': {}",
                name, e
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Arc<Client> {
        Arc::new(Client::new())
    }

    #[test]
    fn test_create_offline_service() {
        let config = ProviderConfig {
            kind: ProviderKind::Offline,
            ..ProviderConfig::default()
        };
        let service = create_service(&config, test_client()).unwrap();
        assert_eq!(service.name(), "offline");
    }

    #[test]
    fn test_create_openai_without_key_env() {
        let config = ProviderConfig {
            api_key_env: None,
            base_url: "http://localhost:4000".to_string(),
            ..ProviderConfig::default()
        };
        let service = create_service(&config, test_client()).unwrap();
        assert_eq!(service.name(), "openai");
    }

    #[test]
    fn test_create_openai_missing_env_var_fails() {
        let config = ProviderConfig {
            api_key_env: Some("PLANCRAFT_TEST_KEY_THAT_DOES_NOT_EXIST".to_string()),
            ..ProviderConfig::default()
        };
        let result = create_service(&config, test_client());
        assert!(matches!(result, Err(CompletionError::Configuration(_))));
    }

    #[test]
    fn test_create_anthropic_requires_key() {
        let config = ProviderConfig {
            kind: ProviderKind::Anthropic,
            api_key_env: None,
            ..ProviderConfig::default()
        };
        let result = create_service(&config, test_client());
        assert!(matches!(result, Err(CompletionError::Configuration(_))));
    }

    #[test]
    fn test_create_anthropic_with_key() {
        std::env::set_var("PLANCRAFT_TEST_ANTHROPIC_KEY", "sk-ant-test");
        let config = ProviderConfig {
            kind: ProviderKind::Anthropic,
            base_url: "https://api.anthropic.com".to_string(),
            api_key_env: Some("PLANCRAFT_TEST_ANTHROPIC_KEY".to_string()),
            ..ProviderConfig::default()
        };
        let service = create_service(&config, test_client()).unwrap();
        std::env::remove_var("PLANCRAFT_TEST_ANTHROPIC_KEY");
        assert_eq!(service.name(), "anthropic");
    }
}
