//! End-to-end tests for plan generation through the orchestrator.

mod common;

use common::{EchoService, FailingService, ScriptedService, ALWAYS_FAILING_CALLS, SECTION_COUNT};
use plancraft::completion::{CompletionResponse, QualityTier};
use plancraft::plan::{
    fallback_content, section_specs, spec_for, ContentSource, GenerationRequest, PipelineError,
    PipelineEvent, SectionKey,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn request() -> GenerationRequest {
    GenerationRequest::new(
        "TrailPaws",
        "On-demand dog walking with GPS-tracked routes. Walkers are vetted locally.",
    )
}

#[tokio::test]
async fn test_every_section_present_in_order() {
    let service = Arc::new(EchoService::new());
    let orchestrator = common::make_orchestrator(service.clone());

    let outcome = orchestrator
        .build(&request(), &CancellationToken::new(), |_| {})
        .await
        .unwrap();

    let keys: Vec<SectionKey> = outcome.document.sections().iter().map(|s| s.key).collect();
    let expected: Vec<SectionKey> = section_specs().iter().map(|s| s.key).collect();
    assert_eq!(keys, expected);
    assert_eq!(outcome.document.len(), SECTION_COUNT);
    assert!(outcome.warnings.is_empty());
    assert!(outcome
        .document
        .sections()
        .iter()
        .all(|s| !s.content.trim().is_empty() && s.source == ContentSource::Generated));
    assert_eq!(service.calls(), SECTION_COUNT);
}

#[tokio::test]
async fn test_always_failing_service_yields_full_fallback_document() {
    let service = Arc::new(FailingService::new());
    let orchestrator = common::make_orchestrator(service.clone());
    let request = request();

    let outcome = orchestrator
        .build(&request, &CancellationToken::new(), |_| {})
        .await
        .unwrap();

    assert_eq!(outcome.warnings.len(), SECTION_COUNT);
    assert_eq!(service.calls(), ALWAYS_FAILING_CALLS);
    for section in outcome.document.sections() {
        assert_eq!(section.source, ContentSource::Fallback);
        assert_eq!(
            section.content,
            fallback_content(spec_for(section.key), &request)
        );
    }
    let warned: Vec<SectionKey> = outcome.warnings.iter().map(|w| w.section).collect();
    assert_eq!(warned, outcome.document.fallback_sections());
}

#[tokio::test]
async fn test_summary_recovers_on_second_degraded_retry() {
    // Summary: fail, fail, succeed. Everything after succeeds.
    let service = Arc::new(ScriptedService::new(vec![
        CompletionResponse::failed("timeout"),
        CompletionResponse::ok("   "),
        CompletionResponse::ok("## Executive Summary\n\nRecovered"),
    ]));
    let orchestrator = common::make_orchestrator(service.clone());

    let outcome = orchestrator
        .build(&request(), &CancellationToken::new(), |_| {})
        .await
        .unwrap();

    assert!(outcome.warnings.is_empty());
    assert_eq!(
        outcome.document.get(SectionKey::ExecutiveSummary),
        Some("## Executive Summary\n\nRecovered")
    );

    let requests = service.requests();
    assert_eq!(requests.len(), SECTION_COUNT + 2);
    // Retries drop to the standard tier with the shorter description.
    assert!(requests[1].prompt.len() <= requests[0].prompt.len());
    assert_eq!(requests[1].model_tier, QualityTier::Standard);
}

#[tokio::test]
async fn test_enhanced_tier_reaches_complex_sections() {
    let service = Arc::new(ScriptedService::new(vec![]));
    let orchestrator = common::make_orchestrator(service.clone());
    let request = request()
        .with_tier(QualityTier::Enhanced)
        .authenticated(true);

    orchestrator
        .build(&request, &CancellationToken::new(), |_| {})
        .await
        .unwrap();

    let tiers: Vec<QualityTier> = service.requests().iter().map(|r| r.model_tier).collect();
    assert!(tiers.contains(&QualityTier::Enhanced));
    assert!(tiers.contains(&QualityTier::Standard));
    assert!(service.requests().iter().all(|r| r.caller_authenticated));
}

#[tokio::test]
async fn test_enhanced_tier_without_authentication_rejected_before_any_call() {
    let service = Arc::new(EchoService::new());
    let orchestrator = common::make_orchestrator(service.clone());
    let request = request().with_tier(QualityTier::Enhanced);

    let result = orchestrator
        .build(&request, &CancellationToken::new(), |_| {})
        .await;

    assert!(matches!(
        result,
        Err(PipelineError::EntitlementRequired { .. })
    ));
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn test_cancelled_token_stops_before_first_section() {
    let service = Arc::new(EchoService::new());
    let orchestrator = common::make_orchestrator(service.clone());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = orchestrator.build(&request(), &cancel, |_| {}).await;

    assert_eq!(result, Err(PipelineError::Cancelled));
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn test_events_report_each_section_once() {
    let orchestrator = common::make_orchestrator(Arc::new(FailingService::new()));
    let mut finished = Vec::new();

    orchestrator
        .build(&request(), &CancellationToken::new(), |event| {
            if let PipelineEvent::SectionFinished {
                key, succeeded, ..
            } = event
            {
                finished.push((key, succeeded));
            }
        })
        .await
        .unwrap();

    assert_eq!(finished.len(), SECTION_COUNT);
    assert!(finished.iter().all(|(_, succeeded)| !succeeded));
}

#[tokio::test]
async fn test_markdown_contains_every_heading() {
    let orchestrator = common::make_orchestrator(Arc::new(FailingService::new()));

    let outcome = orchestrator
        .build(&request(), &CancellationToken::new(), |_| {})
        .await
        .unwrap();
    let markdown = outcome.document.to_markdown();

    assert!(markdown.starts_with("# TrailPaws Business Plan"));
    for spec in section_specs() {
        assert!(markdown.contains(&format!("## {}", spec.display_name)));
    }
}
