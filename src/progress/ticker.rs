use super::estimator::{ProgressEstimator, ProgressState};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

type Publish = Box<dyn Fn(ProgressState) + Send + Sync>;

struct Shared {
    estimator: Mutex<ProgressEstimator>,
    publish: Publish,
}

impl Shared {
    /// Apply `f` and publish the new state if it changed.
    ///
    /// Publishing happens under the estimator lock so observers see states
    /// in the order they were produced.
    fn update(&self, f: impl FnOnce(&mut ProgressEstimator) -> ProgressState) -> ProgressState {
        let mut estimator = self
            .estimator
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = estimator.state();
        let after = f(&mut estimator);
        if after != before {
            (self.publish)(after);
        }
        after
    }
}

/// Background task advancing a [`ProgressEstimator`] on a fixed interval.
pub struct ProgressTicker {
    shared: Arc<Shared>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    _guard: DropGuard,
}

impl ProgressTicker {
    /// Start `estimator` and tick it every `interval`, publishing each
    /// change through `publish`. Must be called inside a tokio runtime.
    pub fn start<F>(estimator: ProgressEstimator, interval: Duration, publish: F) -> Self
    where
        F: Fn(ProgressState) + Send + Sync + 'static,
    {
        let shared = Arc::new(Shared {
            estimator: Mutex::new(estimator),
            publish: Box::new(publish),
        });
        shared.update(ProgressEstimator::start);

        let cancel = CancellationToken::new();
        let task = {
            let shared = Arc::clone(&shared);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let mut interval =
                    tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
                interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = interval.tick() => {
                            shared.update(ProgressEstimator::tick);
                        }
                    }
                }
            })
        };

        Self {
            shared,
            _guard: cancel.clone().drop_guard(),
            cancel,
            task,
        }
    }

    pub fn state(&self) -> ProgressState {
        self.shared
            .estimator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state()
    }

    pub fn section_completed(&self, completed: usize) -> ProgressState {
        self.shared.update(|e| e.section_completed(completed))
    }

    /// Stop ticking and move to `Completed` or `Failed`.
    pub async fn finish(self, succeeded: bool) -> ProgressState {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::debug!(error = %e, "Progress ticker task ended abnormally");
        }
        self.shared.update(|e| if succeeded { e.complete() } else { e.fail() })
    }
}
