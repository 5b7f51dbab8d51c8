use crate::plan::{GenerationOutcome, PipelineError};
use crate::progress::ProgressState;
use uuid::Uuid;

/// Final result of a session as seen by observers.
pub type SessionOutcome = Result<GenerationOutcome, PipelineError>;

/// Receives session notifications.
///
/// Callbacks run synchronously on the session task and must not block.
/// Nothing is delivered for a session after its cancellation returns.
pub trait SessionObserver: Send + Sync + 'static {
    fn on_progress(&self, _session_id: Uuid, _state: ProgressState) {}

    fn on_finished(&self, _session_id: Uuid, _outcome: &SessionOutcome) {}
}
