//! Business-plan generation pipeline.
//!
//! A plan is built one section at a time from a fixed section table. Each
//! section is attempted against a [`CompletionService`](crate::completion::CompletionService),
//! retried in a degraded mode on failure, and finally replaced by
//! deterministic template content, so a valid request always yields a
//! complete document.

pub mod error;
pub mod fallback;
pub mod generator;
pub mod orchestrator;
pub mod prompts;
pub mod sections;
pub mod types;

pub use crate::completion::QualityTier;
pub use error::PipelineError;
pub use fallback::fallback_content;
pub use generator::SectionGenerator;
pub use orchestrator::PipelineOrchestrator;
pub use sections::{section_specs, spec_for, SectionKey, SectionSpec};
pub use types::{
    BusinessPlanDocument, ContentSource, DocumentSection, GenerationOutcome, GenerationRequest,
    PipelineEvent, SectionResult, SectionWarning,
};
