//! Shared test utilities for Plancraft integration tests.
//!
//! Provides scripted completion services, test configuration and router
//! builders to reduce duplication across test files.

#![allow(dead_code)]

use async_trait::async_trait;
use plancraft::api::{create_router, AppState};
use plancraft::completion::{CompletionRequest, CompletionResponse, CompletionService};
use plancraft::config::PlanConfig;
use plancraft::plan::{PipelineOrchestrator, SectionGenerator};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Well-Known Test Constants
// =============================================================================

/// Number of sections in every plan.
pub const SECTION_COUNT: usize = 7;

/// Calls made by an always-failing service: 3 for the summary, 2 for each
/// of the other six sections.
pub const ALWAYS_FAILING_CALLS: usize = 3 + 6 * 2;

// =============================================================================
// Completion Services
// =============================================================================

/// Replies with a short section body derived from the prompt.
pub struct EchoService {
    calls: AtomicUsize,
}

impl EchoService {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionService for EchoService {
    fn name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: CompletionRequest) -> CompletionResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let first_line = request.prompt.lines().next().unwrap_or_default();
        CompletionResponse::ok(format!("Generated: {first_line}"))
    }
}

/// Fails every call.
pub struct FailingService {
    calls: AtomicUsize,
}

impl FailingService {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionService for FailingService {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: CompletionRequest) -> CompletionResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CompletionResponse::failed("upstream unavailable")
    }
}

/// Plays back queued responses, then succeeds; records every request.
pub struct ScriptedService {
    responses: Mutex<VecDeque<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedService {
    pub fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> CompletionResponse {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| CompletionResponse::ok("Scripted section body"))
    }
}

/// Sleeps before answering, so sessions stay in flight.
pub struct SlowService {
    delay: Duration,
}

impl SlowService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CompletionService for SlowService {
    fn name(&self) -> &str {
        "slow"
    }

    async fn complete(&self, _request: CompletionRequest) -> CompletionResponse {
        tokio::time::sleep(self.delay).await;
        CompletionResponse::ok("Slow section body")
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Default config with retries and ticks shortened for tests.
pub fn test_config() -> PlanConfig {
    let mut config = PlanConfig::default();
    config.generation.retry_delay_ms = 0;
    config.progress.tick_interval_ms = 10;
    config
}

pub fn make_orchestrator(service: Arc<dyn CompletionService>) -> Arc<PipelineOrchestrator> {
    let generator = SectionGenerator::new(service, test_config().generation);
    Arc::new(PipelineOrchestrator::new(generator))
}

pub fn make_state(service: Arc<dyn CompletionService>) -> Arc<AppState> {
    make_state_with_config(service, test_config())
}

pub fn make_state_with_config(
    service: Arc<dyn CompletionService>,
    config: PlanConfig,
) -> Arc<AppState> {
    Arc::new(AppState::new(Arc::new(config), service))
}

pub fn make_router(service: Arc<dyn CompletionService>) -> axum::Router {
    create_router(make_state(service))
}

/// Read a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text.
pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
