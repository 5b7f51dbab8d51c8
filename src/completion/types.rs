//! Request and response types for completion calls.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Model quality tier.
///
/// `Standard` is the cheaper, faster tier; `Enhanced` requires an
/// authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    #[default]
    Standard,
    Enhanced,
}

impl FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(QualityTier::Standard),
            "enhanced" => Ok(QualityTier::Enhanced),
            _ => Err(format!("Invalid quality tier: {}", s)),
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityTier::Standard => f.write_str("standard"),
            QualityTier::Enhanced => f.write_str("enhanced"),
        }
    }
}

/// One call to the completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system_prompt: String,
    pub model_tier: QualityTier,
    pub temperature: f32,
    pub max_tokens: u32,
    pub caller_authenticated: bool,
}

/// Outcome of a completion call.
///
/// `success` reflects the provider's view; callers must still check for
/// empty text via [`CompletionResponse::usable_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub success: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompletionResponse {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: text.into(),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            text: String::new(),
            error: Some(error.into()),
        }
    }

    /// Text to use, or `None` if this response counts as a failure.
    pub fn usable_text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        if self.success && !trimmed.is_empty() {
            Some(trimmed)
        } else {
            None
        }
    }

    /// Human-readable reason this response is unusable.
    pub fn failure_reason(&self) -> String {
        match &self.error {
            Some(e) => e.clone(),
            None if self.success => "empty completion".to_string(),
            None => "completion failed".to_string(),
        }
    }
}

impl From<Result<String, super::CompletionError>> for CompletionResponse {
    fn from(result: Result<String, super::CompletionError>) -> Self {
        match result {
            Ok(text) if text.trim().is_empty() => {
                Self::failed(super::CompletionError::EmptyCompletion.to_string())
            }
            Ok(text) => Self::ok(text),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

/// Model names per tier for a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMap {
    pub standard: String,
    pub enhanced: String,
}

impl ModelMap {
    pub fn resolve(&self, tier: QualityTier) -> &str {
        match tier {
            QualityTier::Standard => &self.standard,
            QualityTier::Enhanced => &self.enhanced,
        }
    }
}
