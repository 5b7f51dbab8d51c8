use crate::plan::PipelineError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Cancelled explicitly or superseded by a newer session.
    #[error("Generation session was cancelled")]
    Cancelled,

    #[error(transparent)]
    Pipeline(PipelineError),

    /// The session task panicked or was aborted.
    #[error("Generation session aborted: {0}")]
    Aborted(String),
}

impl From<PipelineError> for SessionError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Cancelled => SessionError::Cancelled,
            other => SessionError::Pipeline(other),
        }
    }
}
