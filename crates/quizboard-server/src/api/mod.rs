//! Router assembly and server lifecycle

pub mod response;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::{future::IntoFuture, net::SocketAddr, time::Duration};
use tokio::{signal, sync::oneshot};
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::error::{ServerError, ServerResult};
use crate::features::{self, FeatureState};
use crate::google::GoogleClient;
use crate::middleware;

/// Build the shared state from configuration
pub fn build_state(config: &Config) -> ServerResult<FeatureState> {
    let google = GoogleClient::new(&config.google)?;
    Ok(FeatureState::new(google, config.sources.clone()))
}

/// Create the application router with all routes and middleware
pub fn create_router(state: FeatureState, config: &Config) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state.clone())
        .nest("/api/v1", features::router(state))
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Bind and serve until a shutdown signal arrives
pub async fn serve(config: Config) -> ServerResult<()> {
    let state = build_state(&config)?;
    let app = create_router(state, &config);

    let raw_addr = format!("{}:{}", config.server.host, config.server.port);
    let addr: SocketAddr = raw_addr
        .parse()
        .map_err(|_| ServerError::BindAddress(raw_addr.clone()))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    let (draining_tx, draining_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = draining_tx.send(());
    });

    let grace = Duration::from_secs(config.server.shutdown_timeout_secs);
    let drain_deadline = async move {
        match draining_rx.await {
            Ok(()) => {
                tracing::info!("Waiting up to {} seconds for connections to close", grace.as_secs());
                tokio::time::sleep(grace).await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = server.into_future() => {
            result?;
            tracing::info!("Server shut down gracefully");
        }
        _ = drain_deadline => {
            tracing::warn!("Shutdown timeout elapsed, dropping open connections");
        }
    }

    Ok(())
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Quizboard Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health(State(state): State<FeatureState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "google_credentials": state.google.has_credentials(),
        "sheets": state.sources.sheets.len(),
        "documents": state.sources.documents.len(),
    }))
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
