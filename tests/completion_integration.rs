//! Provider tests against mock HTTP servers.

mod common;

use plancraft::completion::anthropic::AnthropicService;
use plancraft::completion::openai::OpenAIService;
use plancraft::completion::{CompletionRequest, CompletionService, ModelMap, QualityTier};
use plancraft::plan::{GenerationRequest, PipelineOrchestrator, SectionGenerator};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn models() -> ModelMap {
    ModelMap {
        standard: "small-model".to_string(),
        enhanced: "large-model".to_string(),
    }
}

fn completion_request(tier: QualityTier) -> CompletionRequest {
    CompletionRequest {
        prompt: "Write the market analysis".to_string(),
        system_prompt: "You are a business consultant".to_string(),
        model_tier: tier,
        temperature: 0.7,
        max_tokens: 2000,
        caller_authenticated: false,
    }
}

fn openai(server: &MockServer, timeout: Duration) -> OpenAIService {
    OpenAIService::new(
        server.uri(),
        "sk-test".to_string(),
        models(),
        timeout,
        Arc::new(reqwest::Client::new()),
    )
}

fn anthropic(server: &MockServer) -> AnthropicService {
    AnthropicService::new(
        server.uri(),
        "ant-test".to_string(),
        models(),
        Duration::from_secs(5),
        Arc::new(reqwest::Client::new()),
    )
}

#[tokio::test]
async fn test_openai_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "large-model", "max_tokens": 2000})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "## Market Analysis\n\nGrowing"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = openai(&server, Duration::from_secs(5))
        .complete(completion_request(QualityTier::Enhanced))
        .await;

    assert!(response.success);
    assert_eq!(response.usable_text(), Some("## Market Analysis\n\nGrowing"));
}

#[tokio::test]
async fn test_openai_server_error_is_failed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let response = openai(&server, Duration::from_secs(5))
        .complete(completion_request(QualityTier::Standard))
        .await;

    assert!(!response.success);
    assert!(response.failure_reason().contains("503"));
}

#[tokio::test]
async fn test_openai_empty_content_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "   "}}]
        })))
        .mount(&server)
        .await;

    let response = openai(&server, Duration::from_secs(5))
        .complete(completion_request(QualityTier::Standard))
        .await;

    assert!(response.usable_text().is_none());
}

#[tokio::test]
async fn test_openai_timeout_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(json!({"choices": []})),
        )
        .mount(&server)
        .await;

    let response = openai(&server, Duration::from_millis(100))
        .complete(completion_request(QualityTier::Standard))
        .await;

    assert!(!response.success);
    assert!(response.failure_reason().contains("timeout"));
}

#[tokio::test]
async fn test_openai_malformed_body_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let response = openai(&server, Duration::from_secs(5))
        .complete(completion_request(QualityTier::Standard))
        .await;

    assert!(!response.success);
    assert!(response.failure_reason().contains("Invalid response"));
}

#[tokio::test]
async fn test_anthropic_success_joins_text_blocks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "small-model",
            "system": "You are a business consultant"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                {"type": "text", "text": "## SWOT Analysis\n\n"},
                {"type": "text", "text": "Strengths: focus"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = anthropic(&server)
        .complete(completion_request(QualityTier::Standard))
        .await;

    assert_eq!(
        response.usable_text(),
        Some("## SWOT Analysis\n\nStrengths: focus")
    );
}

#[tokio::test]
async fn test_anthropic_rate_limit_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let response = anthropic(&server)
        .complete(completion_request(QualityTier::Standard))
        .await;

    assert!(!response.success);
    assert!(response.failure_reason().contains("429"));
}

#[tokio::test]
async fn test_unreachable_provider_builds_fallback_document() {
    // Port 9 (discard) is closed on test machines, so every call fails fast.
    let service = OpenAIService::new(
        "http://127.0.0.1:9".to_string(),
        String::new(),
        models(),
        Duration::from_secs(1),
        Arc::new(reqwest::Client::new()),
    );
    let generator = SectionGenerator::new(Arc::new(service), common::test_config().generation);
    let orchestrator = PipelineOrchestrator::new(generator);

    let outcome = orchestrator
        .build(
            &GenerationRequest::new("GreenCommute", "Corporate e-bike leasing"),
            &CancellationToken::new(),
            |_| {},
        )
        .await
        .unwrap();

    assert_eq!(outcome.warnings.len(), common::SECTION_COUNT);
}
