//! Application builder: wires router, middleware, and state into an Axum app
//! and runs the server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use tokengate_auth::RateLimitSweeper;
use tokengate_core::config::AppConfig;
use tokengate_core::error::AppError;
use tokengate_core::traits::SystemClock;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state.clone())
        .layer(from_fn_with_state(state, request_logging))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the TokenGate server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TokenGate server...");

    let state = AppState::new(config, Arc::new(SystemClock::new()));

    if let Some(admin) = &state.config.auth.bootstrap_admin {
        state.auth_service.ensure_bootstrap_admin(admin).await?;
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = if state.config.rate_limit.enabled {
        let sweeper =
            RateLimitSweeper::new(Arc::clone(&state.rate_limiter), &state.config.rate_limit);
        Some(tokio::spawn(async move {
            sweeper.run(shutdown_rx).await;
        }))
    } else {
        None
    };

    let addr = state.config.server.bind_address();
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(address = %addr, "TokenGate server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    })
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(handle) = sweeper_handle {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Rate limit sweeper task failed");
        }
    }

    tracing::info!("TokenGate server stopped");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
