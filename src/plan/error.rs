//! Error types for the generation pipeline.

use thiserror::Error;

/// Fatal pipeline errors. The only cases in which no document is produced.
///
/// Section-level failures are not errors: they resolve to fallback content
/// and surface as [`SectionWarning`](super::SectionWarning)s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A required request field is empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The requested quality tier is not available to this caller.
    #[error("The '{tier}' quality tier requires an authenticated caller")]
    EntitlementRequired { tier: crate::completion::QualityTier },

    /// The build was superseded or explicitly cancelled.
    #[error("Generation was cancelled")]
    Cancelled,

    /// An internal invariant was violated while assembling the document.
    #[error("Internal pipeline error: {0}")]
    Invariant(String),
}

impl PipelineError {
    /// True for errors raised before any completion call was made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingField(_) | PipelineError::EntitlementRequired { .. }
        )
    }
}
