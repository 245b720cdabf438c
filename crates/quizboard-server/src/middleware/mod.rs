//! HTTP layers shared by every route

use axum::http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::config::CorsConfig;

/// Origins the dashboard may be served from. `None` means any origin.
fn explicit_origins(config: &CorsConfig) -> Option<Vec<HeaderValue>> {
    if config.allowed_origins.is_empty() || config.allowed_origins.iter().any(|o| o == "*") {
        return None;
    }

    let origins = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| tracing::warn!(%origin, "Skipping invalid CORS origin"))
                .ok()
        })
        .collect();

    Some(origins)
}

/// CORS for a read-only API: GET and preflight only.
///
/// Credentials are only allowed with an explicit origin list; tower-http
/// rejects them alongside a wildcard.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    match explicit_origins(config) {
        Some(origins) => base
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(config.allow_credentials),
        None => {
            if config.allow_credentials {
                tracing::warn!("CORS_ALLOW_CREDENTIALS has no effect with a wildcard origin");
            }
            base.allow_origin(AllowOrigin::any())
        }
    }
}

/// Request spans at INFO, 5xx responses logged as failures
pub fn tracing_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}
