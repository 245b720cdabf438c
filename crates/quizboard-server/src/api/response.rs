//! JSON envelopes
//!
//! - success: `{"success": true, "data": ..., "meta": ...}`
//! - failure: `{"success": false, "error": {"code": ..., "message": ...}}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// Successful payload, always sent with 200
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Failure with its HTTP status and a stable machine readable code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// A source name that is not in the configuration
    pub fn unknown_source(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "SOURCE_NOT_FOUND", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: ErrorDetail {
                code: self.code,
                message: &self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_success_envelope() {
        let body = serde_json::to_value(ApiResponse::success(vec!["leaderboard"])).unwrap();
        assert_eq!(body, json!({ "success": true, "data": ["leaderboard"] }));
    }

    #[test]
    fn test_meta_is_attached() {
        let body =
            serde_json::to_value(ApiResponse::success(1).with_meta(json!({ "sheets": 2 }))).unwrap();
        assert_eq!(body["meta"]["sheets"], 2);
    }

    #[tokio::test]
    async fn test_error_envelope_and_status() {
        let response = ApiError::new(StatusCode::BAD_GATEWAY, "UPSTREAM_API_ERROR", "down")
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "error": { "code": "UPSTREAM_API_ERROR", "message": "down" } })
        );
    }

    #[test]
    fn test_unknown_source() {
        let err = ApiError::unknown_source("Sheet 'x' is not configured");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "SOURCE_NOT_FOUND");
    }
}
