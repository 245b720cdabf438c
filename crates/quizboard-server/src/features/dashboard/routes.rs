use crate::api::response::{ApiError, ApiResponse};
use crate::features::shared::upstream_error;
use crate::features::FeatureState;
use axum::{extract::State, routing::get, Router};
use chrono::Utc;
use serde_json::json;

use super::queries::{DashboardResponse, GetDashboardError, GetDashboardQuery};

pub fn dashboard_routes() -> Router<FeatureState> {
    Router::new().route("/", get(get_dashboard))
}

#[tracing::instrument(skip(state))]
async fn get_dashboard(
    State(state): State<FeatureState>,
) -> Result<ApiResponse<DashboardResponse>, ApiError> {
    let response = super::queries::get_dashboard::handle(&state, GetDashboardQuery).await?;

    let (sheets, documents) = (response.sheets.len(), response.documents.len());
    tracing::info!(sheets, documents, "Assembled dashboard");

    Ok(ApiResponse::success(response).with_meta(json!({
        "fetched_at": Utc::now().to_rfc3339(),
        "sheets": sheets,
        "documents": documents,
    })))
}

impl From<GetDashboardError> for ApiError {
    fn from(err: GetDashboardError) -> Self {
        match err {
            GetDashboardError::Sheet { name, source } => {
                upstream_error(&format!("sheet '{}'", name), &source)
            }
            GetDashboardError::Document { name, source } => {
                upstream_error(&format!("document '{}'", name), &source)
            }
        }
    }
}
