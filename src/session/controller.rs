use super::error::SessionError;
use super::gate::SessionGate;
use super::observer::{SessionObserver, SessionOutcome};
use crate::config::ProgressConfig;
use crate::plan::{
    GenerationOutcome, GenerationRequest, PipelineError, PipelineEvent, PipelineOrchestrator,
};
use crate::progress::{ProgressEstimator, ProgressState, ProgressTicker};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

/// Handles to the session that is currently running.
struct ActiveSession {
    id: Uuid,
    token: CancellationToken,
    gate: Arc<SessionGate>,
    progress: watch::Receiver<ProgressState>,
}

impl ActiveSession {
    fn cancel(&self) {
        self.gate.close();
        self.token.cancel();
    }
}

/// Owns at most one in-flight plan build.
pub struct SessionController {
    orchestrator: Arc<PipelineOrchestrator>,
    progress: ProgressConfig,
    observer: Option<Arc<dyn SessionObserver>>,
    active: Mutex<Option<ActiveSession>>,
    /// When a session last started or finished.
    last_activity: Arc<Mutex<Instant>>,
}

impl SessionController {
    pub fn new(orchestrator: Arc<PipelineOrchestrator>, progress: ProgressConfig) -> Self {
        Self {
            orchestrator,
            progress,
            observer: None,
            active: Mutex::new(None),
            last_activity: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Start a new session, cancelling the previous one first.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(&self, request: GenerationRequest) -> SessionHandle {
        let id = Uuid::new_v4();
        let token = CancellationToken::new();
        let gate = Arc::new(SessionGate::new());
        let (progress_tx, progress_rx) = watch::channel(ProgressState::default());

        {
            let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(previous) = active.take() {
                tracing::info!(
                    session_id = %previous.id,
                    superseded_by = %id,
                    "Cancelling superseded generation session"
                );
                previous.cancel();
            }
            *active = Some(ActiveSession {
                id,
                token: token.clone(),
                gate: Arc::clone(&gate),
                progress: progress_rx.clone(),
            });
        }

        *self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Instant::now();

        let publisher = Publisher {
            id,
            last_activity: Arc::clone(&self.last_activity),
            gate: Arc::clone(&gate),
            observer: self.observer.clone(),
            progress: Arc::new(progress_tx),
        };

        let task = tokio::spawn(
            run_session(
                Arc::clone(&self.orchestrator),
                Arc::new(request),
                self.progress.clone(),
                token.clone(),
                publisher,
            )
            .instrument(tracing::info_span!("session", session_id = %id)),
        );

        SessionHandle {
            id,
            token,
            gate,
            progress: progress_rx,
            task,
        }
    }

    /// Cancel the running session, if any. Returns whether one was running.
    pub fn cancel_active(&self) -> bool {
        let active = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match active {
            Some(session) => {
                tracing::info!(session_id = %session.id, "Cancelling generation session");
                session.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel session `id` if it is still the active one.
    pub fn cancel_session(&self, id: Uuid) -> bool {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        match active.as_ref() {
            Some(session) if session.id == id => {
                if let Some(session) = active.take() {
                    tracing::info!(session_id = %session.id, "Cancelling generation session");
                    session.cancel();
                }
                true
            }
            _ => false,
        }
    }

    /// Id of the most recently started session that has not been cancelled.
    pub fn active_session_id(&self) -> Option<Uuid> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.id)
    }

    /// Whether the most recently started session is still building.
    pub fn is_running(&self) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|s| {
                // A closed channel means the session task is gone.
                !s.progress.borrow().phase.is_terminal() && s.progress.has_changed().is_ok()
            })
    }

    /// Time since a session last started or finished; `None` while one is
    /// running.
    pub fn idle_for(&self) -> Option<Duration> {
        if self.is_running() {
            return None;
        }
        let last = *self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Some(last.elapsed())
    }

    /// Latest progress of the most recently started session.
    pub fn progress(&self) -> ProgressState {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| *s.progress.borrow())
            .unwrap_or_default()
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.cancel_active();
    }
}

/// Caller's view of one session.
pub struct SessionHandle {
    id: Uuid,
    token: CancellationToken,
    gate: Arc<SessionGate>,
    progress: watch::Receiver<ProgressState>,
    task: JoinHandle<SessionOutcome>,
}

impl SessionHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Cancel this session. No observer callback for it fires once this
    /// returns.
    pub fn cancel(&self) {
        self.gate.close();
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn progress(&self) -> ProgressState {
        *self.progress.borrow()
    }

    /// Subscribe to progress updates.
    pub fn progress_updates(&self) -> watch::Receiver<ProgressState> {
        self.progress.clone()
    }

    /// Wait for the session to finish.
    ///
    /// A session cancelled at any point resolves to
    /// [`SessionError::Cancelled`], even if its build completed.
    pub async fn wait(self) -> Result<GenerationOutcome, SessionError> {
        let joined = self.task.await;
        if self.token.is_cancelled() {
            return Err(SessionError::Cancelled);
        }
        match joined {
            Ok(outcome) => outcome.map_err(SessionError::from),
            Err(e) => Err(SessionError::Aborted(e.to_string())),
        }
    }
}

/// Delivers progress to the watch channel and, while the gate is open, to
/// the observer.
#[derive(Clone)]
struct Publisher {
    id: Uuid,
    last_activity: Arc<Mutex<Instant>>,
    gate: Arc<SessionGate>,
    observer: Option<Arc<dyn SessionObserver>>,
    progress: Arc<watch::Sender<ProgressState>>,
}

impl Publisher {
    fn progress(&self, state: ProgressState) {
        self.gate.emit(|| {
            self.progress.send_replace(state);
            if let Some(observer) = &self.observer {
                observer.on_progress(self.id, state);
            }
        });
    }

    fn finished(&self, outcome: &SessionOutcome) {
        *self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Instant::now();
        self.gate.emit(|| {
            if let Some(observer) = &self.observer {
                observer.on_finished(self.id, outcome);
            }
        });
    }
}

async fn run_session(
    orchestrator: Arc<PipelineOrchestrator>,
    request: Arc<GenerationRequest>,
    progress: ProgressConfig,
    token: CancellationToken,
    publisher: Publisher,
) -> SessionOutcome {
    tracing::info!(business = %request.business_name, "Generation session started");

    let ticker = {
        let publisher = publisher.clone();
        ProgressTicker::start(
            ProgressEstimator::new(orchestrator.section_count(), progress.tick_fraction),
            Duration::from_millis(progress.tick_interval_ms),
            move |state| publisher.progress(state),
        )
    };

    let result = tokio::select! {
        biased;
        _ = token.cancelled() => Err(PipelineError::Cancelled),
        result = orchestrator.build(&request, &token, |event| {
            if let PipelineEvent::SectionFinished { index, .. } = event {
                ticker.section_completed(index + 1);
            }
        }) => result,
    };

    // A build that raced past cancellation is still discarded.
    let result = if token.is_cancelled() {
        Err(PipelineError::Cancelled)
    } else {
        result
    };

    ticker.finish(result.is_ok()).await;

    let outcome = match &result {
        Ok(_) => "completed",
        Err(PipelineError::Cancelled) => "cancelled",
        Err(_) => "failed",
    };
    metrics::counter!("plancraft_sessions_total", "outcome" => outcome).increment(1);

    match &result {
        Ok(generated) => tracing::info!(
            warnings = generated.warnings.len(),
            "Generation session completed"
        ),
        Err(e) => tracing::info!(error = %e, "Generation session ended"),
    }

    publisher.finished(&result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionRequest, CompletionResponse, CompletionService};
    use crate::config::GenerationConfig;
    use crate::plan::SectionGenerator;
    use crate::progress::ProgressPhase;
    use async_trait::async_trait;

    struct Slow {
        delay: Duration,
    }

    #[async_trait]
    impl CompletionService for Slow {
        fn name(&self) -> &str {
            "slow"
        }

        async fn complete(&self, _request: CompletionRequest) -> CompletionResponse {
            tokio::time::sleep(self.delay).await;
            CompletionResponse::ok("## Section\n\nGenerated")
        }
    }

    #[derive(Default)]
    struct Recorder {
        progress: Mutex<Vec<(Uuid, ProgressState)>>,
        finished: Mutex<Vec<(Uuid, bool)>>,
    }

    impl SessionObserver for Recorder {
        fn on_progress(&self, session_id: Uuid, state: ProgressState) {
            self.progress.lock().unwrap().push((session_id, state));
        }

        fn on_finished(&self, session_id: Uuid, outcome: &SessionOutcome) {
            self.finished.lock().unwrap().push((session_id, outcome.is_ok()));
        }
    }

    fn controller(delay_ms: u64, observer: Arc<Recorder>) -> SessionController {
        let generator = SectionGenerator::new(
            Arc::new(Slow {
                delay: Duration::from_millis(delay_ms),
            }),
            GenerationConfig::default(),
        );
        SessionController::new(
            Arc::new(PipelineOrchestrator::new(generator)),
            ProgressConfig {
                tick_interval_ms: 50,
                tick_fraction: 0.25,
            },
        )
        .with_observer(observer)
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_completes_with_full_progress() {
        let recorder = Arc::new(Recorder::default());
        let controller = controller(100, Arc::clone(&recorder));

        let handle = controller.start(GenerationRequest::new("Acme", "Packaging"));
        let id = handle.id();
        let outcome = handle.wait().await.unwrap();

        assert_eq!(outcome.document.len(), 7);
        assert_eq!(controller.progress().percent_complete, 100);
        assert_eq!(controller.progress().phase, ProgressPhase::Completed);
        assert_eq!(*recorder.finished.lock().unwrap(), vec![(id, true)]);

        let progress = recorder.progress.lock().unwrap();
        assert!(progress
            .windows(2)
            .all(|w| w[0].1.percent_complete <= w[1].1.percent_complete));
        assert!(progress
            .iter()
            .filter(|(_, s)| !s.phase.is_terminal())
            .all(|(_, s)| s.percent_complete < 100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_supersedes_first() {
        let recorder = Arc::new(Recorder::default());
        let controller = controller(100, Arc::clone(&recorder));

        let first = controller.start(GenerationRequest::new("First", "Packaging"));
        tokio::time::sleep(Duration::from_millis(150)).await;
        let second = controller.start(GenerationRequest::new("Second", "Bakery"));
        let second_id = second.id();

        assert_eq!(first.wait().await.unwrap_err(), SessionError::Cancelled);
        let outcome = second.wait().await.unwrap();
        assert_eq!(outcome.document.business_name(), "Second");

        assert_eq!(*recorder.finished.lock().unwrap(), vec![(second_id, true)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_callbacks_after_cancel_returns() {
        let recorder = Arc::new(Recorder::default());
        let controller = controller(100, Arc::clone(&recorder));

        let handle = controller.start(GenerationRequest::new("Acme", "Packaging"));
        let id = handle.id();
        tokio::time::sleep(Duration::from_millis(250)).await;
        handle.cancel();
        let seen_at_cancel = recorder.progress.lock().unwrap().len();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(recorder.progress.lock().unwrap().len(), seen_at_cancel);
        assert!(recorder.finished.lock().unwrap().is_empty());
        assert!(recorder
            .progress
            .lock()
            .unwrap()
            .iter()
            .all(|(sid, s)| *sid == id && s.phase == ProgressPhase::Running));
        assert_eq!(handle.wait().await.unwrap_err(), SessionError::Cancelled);
    }

    #[tokio::test]
    async fn test_validation_failure_is_reported() {
        let recorder = Arc::new(Recorder::default());
        let controller = controller(0, Arc::clone(&recorder));

        let handle = controller.start(GenerationRequest::new("", "Packaging"));
        let err = handle.wait().await.unwrap_err();

        assert_eq!(
            err,
            SessionError::Pipeline(PipelineError::MissingField("business_name"))
        );
        assert_eq!(controller.progress().phase, ProgressPhase::Failed);
        assert_eq!(recorder.finished.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_session_only_matches_active_id() {
        let controller = controller(100, Arc::new(Recorder::default()));
        let handle = controller.start(GenerationRequest::new("Acme", "Packaging"));

        assert!(!controller.cancel_session(Uuid::new_v4()));
        assert_eq!(controller.active_session_id(), Some(handle.id()));
        assert!(controller.cancel_session(handle.id()));
        assert_eq!(controller.active_session_id(), None);
        assert_eq!(handle.wait().await.unwrap_err(), SessionError::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_time_counts_from_last_finish() {
        let controller = controller(100, Arc::new(Recorder::default()));
        let handle = controller.start(GenerationRequest::new("Acme", "Packaging"));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(controller.is_running());
        assert_eq!(controller.idle_for(), None);

        handle.wait().await.unwrap();
        assert!(!controller.is_running());
        let idle = controller.idle_for().unwrap();
        assert!(idle < Duration::from_secs(1));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(controller.idle_for().unwrap() >= Duration::from_secs(60));
        // Progress of the finished session stays readable.
        assert_eq!(controller.progress().phase, ProgressPhase::Completed);
    }

    #[tokio::test]
    async fn test_cancel_active_without_session() {
        let controller = controller(0, Arc::new(Recorder::default()));
        assert!(!controller.cancel_active());
        assert_eq!(controller.progress(), ProgressState::default());
    }
}
