//! Mapping of upstream failures to HTTP responses
//!
//! | error                     | status | code                 |
//! |---------------------------|--------|----------------------|
//! | missing credentials       | 503    | `CONFIG_MISSING`     |
//! | invalid client config     | 500    | `CONFIG_INVALID`     |
//! | transport failure         | 502    | `NETWORK_ERROR`      |
//! | Google 404                | 404    | `NOT_FOUND`          |
//! | any other Google failure  | 502    | `UPSTREAM_API_ERROR` |

use axum::http::StatusCode;

use crate::api::response::ApiError;
use crate::google::GoogleApiError;

/// Status code and error code for an upstream failure
pub fn google_error_status(err: &GoogleApiError) -> (StatusCode, &'static str) {
    match err {
        GoogleApiError::ConfigMissing(_) => (StatusCode::SERVICE_UNAVAILABLE, "CONFIG_MISSING"),
        GoogleApiError::InvalidConfig(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_INVALID"),
        GoogleApiError::Network(_) => (StatusCode::BAD_GATEWAY, "NETWORK_ERROR"),
        GoogleApiError::Upstream { status, .. } if *status == StatusCode::NOT_FOUND => {
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        }
        GoogleApiError::Upstream { .. }
        | GoogleApiError::Decode(_)
        | GoogleApiError::EmptySpreadsheet(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_API_ERROR"),
    }
}

/// API error for an upstream failure, with `context` prefixed to the
/// message (e.g. the source name).
pub fn upstream_error(context: &str, err: &GoogleApiError) -> ApiError {
    let (status, code) = google_error_status(err);

    if status.is_server_error() {
        tracing::error!(context, error = %err, "Upstream request failed");
    } else {
        tracing::info!(context, error = %err, "Upstream resource not found");
    }

    ApiError::new(status, code, format!("{}: {}", context, err))
}
