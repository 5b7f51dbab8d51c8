//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::{apply_offline, init_tracing, load_config, ServeArgs};
use crate::config::{PlanConfig, ProviderKind};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<PlanConfig, Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;

    // CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.offline {
        apply_offline(&mut config);
    }

    Ok(config)
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    init_tracing(&config.logging)?;

    tracing::info!("Starting Plancraft server");
    tracing::debug!(?config, "Loaded configuration");

    let state = Arc::new(AppState::from_config(Arc::new(config.clone()))?);
    tracing::info!(provider = %state.provider, "Completion provider ready");
    let app = create_router(Arc::clone(&state));

    let cancel_token = CancellationToken::new();
    let sweeper = state.spawn_session_sweeper(cancel_token.clone());
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %addr, "Plancraft API server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token.clone()))
        .await?;

    cancel_token.cancel();
    let _ = sweeper.await;

    // In-flight sessions stop with their controllers.
    let cancelled = state
        .sessions
        .iter()
        .filter(|entry| entry.value().cancel_active())
        .count();
    if cancelled > 0 {
        tracing::info!(cancelled, "Cancelled in-flight sessions");
    }

    tracing::info!("Plancraft server stopped");
    Ok(())
}
