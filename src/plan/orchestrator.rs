//! Sequential build of a full business plan.

use super::error::PipelineError;
use super::generator::SectionGenerator;
use super::sections::{section_specs, SectionKey, SectionSpec};
use super::types::{
    BusinessPlanDocument, ContentSource, DocumentSection, GenerationOutcome, GenerationRequest,
    PipelineEvent, SectionWarning,
};
use tokio_util::sync::CancellationToken;

/// Drives the section table in order and assembles the document.
pub struct PipelineOrchestrator {
    generator: SectionGenerator,
}

impl PipelineOrchestrator {
    pub fn new(generator: SectionGenerator) -> Self {
        Self { generator }
    }

    pub fn section_count(&self) -> usize {
        section_specs().len()
    }

    fn max_attempts(&self, spec: &SectionSpec) -> u32 {
        let config = self.generator.config();
        if spec.key == SectionKey::ExecutiveSummary {
            config.critical_max_attempts
        } else {
            config.section_max_attempts
        }
    }

    /// Build every section of the plan.
    ///
    /// Fails only on validation or cancellation; section failures become
    /// fallback content plus a warning. `cancel` is checked before each
    /// section, so an in-flight completion finishes but its result is
    /// discarded.
    pub async fn build<F>(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
        mut on_event: F,
    ) -> Result<GenerationOutcome, PipelineError>
    where
        F: FnMut(PipelineEvent) + Send,
    {
        request.validate()?;

        let specs = section_specs();
        let total = specs.len();
        let mut sections = Vec::with_capacity(total);
        let mut warnings = Vec::new();

        tracing::info!(
            business = %request.business_name,
            tier = %request.quality_tier,
            sections = total,
            "Starting plan generation"
        );

        for (index, spec) in specs.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!(completed = index, total, "Plan generation cancelled");
                return Err(PipelineError::Cancelled);
            }

            on_event(PipelineEvent::SectionStarted {
                index,
                total,
                key: spec.key,
            });

            let result = self
                .generator
                .generate(spec, request, 0, self.max_attempts(spec))
                .await;

            if cancel.is_cancelled() {
                tracing::info!(completed = index, total, "Plan generation cancelled");
                return Err(PipelineError::Cancelled);
            }

            let source = if result.succeeded {
                ContentSource::Generated
            } else {
                let message = result
                    .error
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string());
                warnings.push(SectionWarning {
                    section: spec.key,
                    message,
                });
                ContentSource::Fallback
            };

            on_event(PipelineEvent::SectionFinished {
                index,
                total,
                key: spec.key,
                succeeded: result.succeeded,
            });

            sections.push(DocumentSection {
                key: spec.key,
                title: spec.display_name.to_string(),
                content: result.content,
                source,
            });
        }

        let document = BusinessPlanDocument::assemble(request.business_name.clone(), sections)?;

        if warnings.is_empty() {
            tracing::info!(business = %request.business_name, "Plan generation complete");
        } else {
            tracing::warn!(
                business = %request.business_name,
                fallback_sections = warnings.len(),
                "Plan generation complete with fallback content"
            );
        }

        Ok(GenerationOutcome { document, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{
        CompletionRequest, CompletionResponse, CompletionService, QualityTier,
    };
    use crate::config::GenerationConfig;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct AlwaysFails {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionService for AlwaysFails {
        fn name(&self) -> &str {
            "always-fails"
        }

        async fn complete(&self, _request: CompletionRequest) -> CompletionResponse {
            self.calls.fetch_add(1, Ordering::SeqCst);
            CompletionResponse::failed("service unavailable")
        }
    }

    struct Echo;

    #[async_trait]
    impl CompletionService for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: CompletionRequest) -> CompletionResponse {
            CompletionResponse::ok(format!("## Section\n\n{} tokens", request.max_tokens))
        }
    }

    fn orchestrator(service: Arc<dyn CompletionService>) -> PipelineOrchestrator {
        PipelineOrchestrator::new(SectionGenerator::new(
            service,
            GenerationConfig {
                retry_delay_ms: 0,
                ..GenerationConfig::default()
            },
        ))
    }

    #[tokio::test]
    async fn test_all_sections_generated() {
        let orchestrator = orchestrator(Arc::new(Echo));
        let request = GenerationRequest::new("Acme", "Packaging");

        let outcome = orchestrator
            .build(&request, &CancellationToken::new(), |_| {})
            .await
            .unwrap();

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.document.len(), 7);
        assert_eq!(
            outcome.document.get(SectionKey::MarketAnalysis),
            Some("## Section\n\n2000 tokens")
        );
    }

    #[tokio::test]
    async fn test_always_failing_service_yields_full_fallback_document() {
        let service = Arc::new(AlwaysFails {
            calls: AtomicUsize::new(0),
        });
        let orchestrator = orchestrator(service.clone());
        let request = GenerationRequest::new("Acme", "Packaging");

        let outcome = orchestrator
            .build(&request, &CancellationToken::new(), |_| {})
            .await
            .unwrap();

        assert_eq!(outcome.document.len(), 7);
        assert_eq!(outcome.warnings.len(), 7);
        assert_eq!(outcome.document.fallback_sections().len(), 7);
        // summary: 1 + 2 retries; six others: 1 + 1 retry
        assert_eq!(service.calls.load(Ordering::SeqCst), 3 + 6 * 2);
    }

    #[tokio::test]
    async fn test_validation_happens_before_any_call() {
        let service = Arc::new(AlwaysFails {
            calls: AtomicUsize::new(0),
        });
        let orchestrator = orchestrator(service.clone());
        let request = GenerationRequest::new("Acme", "Packaging").with_tier(QualityTier::Enhanced);

        let err = orchestrator
            .build(&request, &CancellationToken::new(), |_| {})
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_build() {
        let orchestrator = orchestrator(Arc::new(Echo));
        let request = GenerationRequest::new("Acme", "Packaging");
        let token = CancellationToken::new();
        let mut finished = 0;

        let err = orchestrator
            .build(&request, &token, |event| {
                if let PipelineEvent::SectionFinished { index, .. } = event {
                    finished += 1;
                    if index == 1 {
                        token.cancel();
                    }
                }
            })
            .await
            .unwrap_err();

        assert_eq!(err, PipelineError::Cancelled);
        assert_eq!(finished, 2);
    }

    #[tokio::test]
    async fn test_events_are_ordered() {
        let orchestrator = orchestrator(Arc::new(Echo));
        let request = GenerationRequest::new("Acme", "Packaging");
        let mut events = Vec::new();

        orchestrator
            .build(&request, &CancellationToken::new(), |event| events.push(event))
            .await
            .unwrap();

        assert_eq!(events.len(), 14);
        assert_eq!(
            events[0],
            PipelineEvent::SectionStarted {
                index: 0,
                total: 7,
                key: SectionKey::ExecutiveSummary
            }
        );
        assert!(matches!(
            events[13],
            PipelineEvent::SectionFinished {
                index: 6,
                key: SectionKey::ImplementationTimeline,
                succeeded: true,
                ..
            }
        ));
    }
}
