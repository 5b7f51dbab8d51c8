//! Single-section generation with bounded retry and fallback.

use super::fallback::fallback_content;
use super::prompts::{build_prompt, SYSTEM_PROMPT};
use super::sections::SectionSpec;
use super::types::{GenerationRequest, SectionResult};
use crate::completion::{CompletionRequest, CompletionService, QualityTier};
use crate::config::GenerationConfig;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Generates one section against the completion service.
///
/// Never fails: when retries are exhausted the result carries the section's
/// fallback content and the last error.
pub struct SectionGenerator {
    service: Arc<dyn CompletionService>,
    config: GenerationConfig,
    prompt_preview: Option<usize>,
}

impl SectionGenerator {
    pub fn new(service: Arc<dyn CompletionService>, config: GenerationConfig) -> Self {
        Self {
            service,
            config,
            prompt_preview: None,
        }
    }

    /// Log the first `limit` characters of each prompt at debug level.
    pub fn with_prompt_previews(mut self, limit: Option<usize>) -> Self {
        self.prompt_preview = limit;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Tier for the first attempt at a section.
    ///
    /// Forced-live and simple sections always take the cheaper tier.
    pub fn select_tier(spec: &SectionSpec, requested: QualityTier) -> QualityTier {
        if spec.force_live_generation || spec.key.is_simple() {
            QualityTier::Standard
        } else {
            requested
        }
    }

    fn build_request(
        &self,
        spec: &SectionSpec,
        request: &GenerationRequest,
        tier: QualityTier,
    ) -> CompletionRequest {
        CompletionRequest {
            prompt: build_prompt(spec, request),
            system_prompt: SYSTEM_PROMPT.to_string(),
            model_tier: tier,
            temperature: self.config.temperature,
            max_tokens: spec.max_output_tokens,
            caller_authenticated: request.caller_authenticated,
        }
    }

    /// Generate `spec`.
    ///
    /// `attempt` is the number of retries already spent; any `attempt > 0`
    /// runs in degraded mode. While `attempt < max_attempts` a failure waits
    /// `retry_delay_ms` and retries degraded; after that the fallback is
    /// returned.
    pub async fn generate(
        &self,
        spec: &SectionSpec,
        request: &GenerationRequest,
        attempt: u32,
        max_attempts: u32,
    ) -> SectionResult {
        let section = spec.key.as_str();
        let started = Instant::now();
        let mut attempt = attempt;

        loop {
            let degraded = attempt > 0;
            let completion_request = if degraded {
                let reduced = request.degraded(self.config.degraded_description_chars);
                self.build_request(spec, &reduced, QualityTier::Standard)
            } else {
                self.build_request(spec, request, Self::select_tier(spec, request.quality_tier))
            };
            let tier = completion_request.model_tier;

            if let Some(preview) =
                crate::logging::truncate_prompt(&completion_request.prompt, self.prompt_preview)
            {
                tracing::debug!(section, attempt, prompt = %preview, "Prompt preview");
            }

            metrics::counter!(
                "plancraft_completion_attempts_total",
                "tier" => tier.to_string(),
            )
            .increment(1);

            let response = self.service.complete(completion_request).await;

            if let Some(text) = response.usable_text() {
                tracing::debug!(
                    section,
                    attempt,
                    %tier,
                    degraded,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Section generated"
                );
                record_outcome(section, "generated", started);
                return SectionResult::generated(text);
            }

            let reason = response.failure_reason();

            if attempt < max_attempts {
                tracing::debug!(
                    section,
                    attempt,
                    %tier,
                    error = %reason,
                    retry_delay_ms = self.config.retry_delay_ms,
                    "Section attempt failed, retrying in degraded mode"
                );
                tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
                attempt += 1;
                continue;
            }

            tracing::warn!(
                section,
                attempts = attempt + 1,
                error = %reason,
                "Section generation exhausted retries, using fallback content"
            );
            record_outcome(section, "fallback", started);
            return SectionResult::fallback(fallback_content(spec, request), reason);
        }
    }
}

fn record_outcome(section: &'static str, outcome: &'static str, started: Instant) {
    metrics::counter!(
        "plancraft_sections_total",
        "section" => section,
        "outcome" => outcome,
    )
    .increment(1);
    metrics::histogram!("plancraft_section_duration_seconds", "section" => section)
        .record(started.elapsed().as_secs_f64());
}
