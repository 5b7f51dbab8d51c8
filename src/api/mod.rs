//! # HTTP API
//!
//! JSON endpoints over the generation pipeline and the extraction engine.
//!
//! ## Endpoints
//!
//! - `POST /v1/plans` - Generate a business plan (supersedes the caller's previous request)
//! - `GET /v1/plans/progress` - Progress of the caller's current plan
//! - `DELETE /v1/plans` - Cancel the caller's current plan
//! - `POST /v1/extract` - Extract entities from free text
//! - `GET /health` - Service status
//! - `GET /metrics` - Prometheus metrics
//!
//! Callers are identified by the `x-caller-id` header and their entitlement
//! by `x-caller-authenticated`, both set by an upstream proxy.
//!
//! ## Example
//!
//! ```no_run
//! use plancraft::api::{create_router, AppState};
//! use plancraft::config::PlanConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(PlanConfig::default());
//! let state = Arc::new(AppState::from_config(config)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors share one envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "Missing required field: business_name",
//!     "type": "invalid_request_error",
//!     "param": "business_name",
//!     "code": "validation_error"
//!   }
//! }
//! ```

mod extract;
pub mod headers;
mod health;
mod plans;
pub mod types;

pub use headers::CallerIdentity;
pub use types::*;

use crate::completion::{factory::create_service_with_client, CompletionError, CompletionService};
use crate::config::PlanConfig;
use crate::metrics::MetricsCollector;
use crate::plan::{PipelineOrchestrator, SectionGenerator};
use crate::session::SessionController;
use axum::{
    routing::{get, post},
    Router,
};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<PlanConfig>,
    pub orchestrator: Arc<PipelineOrchestrator>,
    /// One session controller per caller id.
    pub sessions: DashMap<String, Arc<SessionController>>,
    /// Name of the configured completion provider.
    pub provider: String,
    pub metrics_collector: Arc<MetricsCollector>,
}

impl AppState {
    /// Create state around an existing completion service.
    pub fn new(config: Arc<PlanConfig>, service: Arc<dyn CompletionService>) -> Self {
        let provider = service.name().to_string();
        let generator = SectionGenerator::new(service, config.generation.clone())
            .with_prompt_previews(config.logging.preview_limit());

        Self {
            orchestrator: Arc::new(PipelineOrchestrator::new(generator)),
            sessions: DashMap::new(),
            provider,
            metrics_collector: Arc::new(MetricsCollector::install(Instant::now())),
            config,
        }
    }

    /// Create state with the provider named in `config`.
    pub fn from_config(config: Arc<PlanConfig>) -> Result<Self, CompletionError> {
        let service = create_service_with_client(&config.provider)?;
        Ok(Self::new(config, service))
    }

    /// The caller's session controller, created on first use.
    pub fn controller_for(&self, caller_id: &str) -> Arc<SessionController> {
        self.sessions
            .entry(caller_id.to_string())
            .or_insert_with(|| {
                Arc::new(SessionController::new(
                    Arc::clone(&self.orchestrator),
                    self.config.progress.clone(),
                ))
            })
            .clone()
    }

    /// Drop the controllers of callers that have had nothing running for at
    /// least `max_idle`. Returns how many were dropped.
    pub fn prune_idle_sessions(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, controller| !matches!(controller.idle_for(), Some(idle) if idle >= max_idle));
        let pruned = before.saturating_sub(self.sessions.len());
        if pruned > 0 {
            tracing::debug!(pruned, remaining = self.sessions.len(), "Pruned idle caller sessions");
        }
        pruned
    }

    /// Periodically prune idle callers until `cancel` fires.
    pub fn spawn_session_sweeper(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let state = Arc::clone(self);
        let max_idle = Duration::from_secs(state.config.server.session_idle_seconds);
        let period = (max_idle / 2).max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::debug!("Session sweeper stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        state.prune_idle_sessions(max_idle);
                    }
                }
            }
        })
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body = state.config.server.max_body_bytes;
    Router::new()
        .route(
            "/v1/plans",
            post(plans::create).delete(plans::cancel),
        )
        .route("/v1/plans/progress", get(plans::progress))
        .route("/v1/extract", post(extract::handle))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(crate::logging::request_id))
        .with_state(state)
}
