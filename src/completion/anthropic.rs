//! Anthropic Messages API completion provider.

use super::{CompletionError, CompletionRequest, CompletionResponse, CompletionService, ModelMap};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Handles Anthropic Claude calls via POST /v1/messages with `x-api-key`.
///
/// The system prompt travels as the top-level `system` parameter rather than
/// as a message.
pub struct AnthropicService {
    base_url: String,
    api_key: String,
    models: ModelMap,
    timeout: Duration,
    client: Arc<Client>,
}

impl AnthropicService {
    pub fn new(
        base_url: String,
        api_key: String,
        models: ModelMap,
        timeout: Duration,
        client: Arc<Client>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            models,
            timeout,
            client,
        }
    }

    fn build_body(&self, request: &CompletionRequest) -> MessagesRequest {
        MessagesRequest {
            model: self.models.resolve(request.model_tier).to_string(),
            system: request.system_prompt.clone(),
            messages: vec![MessagesTurn {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/v1/messages", self.base_url);
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.build_body(request))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CompletionError::from_transport(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let message: MessagesResponse = response.json().await.map_err(|e| {
            CompletionError::InvalidResponse(format!("Failed to parse messages response: {}", e))
        })?;

        Ok(message.joined_text())
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    system: String,
    messages: Vec<MessagesTurn>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct MessagesTurn {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    /// Concatenate every text block; tool-use and other blocks are skipped.
    fn joined_text(self) -> String {
        self.content
            .into_iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text)
            .collect::<Vec<_>>()
            .join("")
    }
}

#[async_trait]
impl CompletionService for AnthropicService {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, request: CompletionRequest) -> CompletionResponse {
        self.send(&request).await.into()
    }
}
