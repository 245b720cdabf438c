use crate::api::response::{ApiError, ApiResponse};
use crate::features::shared::upstream_error;
use crate::features::FeatureState;
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::queries::{
    GetSheetRecordsError, GetSheetRecordsQuery, ListSheetsResponse, SheetRecordsResponse,
};

pub fn sheets_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_sheets))
        .route("/:name", get(get_sheet_records))
}

async fn list_sheets(State(state): State<FeatureState>) -> ApiResponse<ListSheetsResponse> {
    ApiResponse::success(super::queries::list_sheets::handle(&state.sources))
}

#[tracing::instrument(skip(state))]
async fn get_sheet_records(
    State(state): State<FeatureState>,
    Path(name): Path<String>,
) -> Result<ApiResponse<SheetRecordsResponse>, ApiError> {
    let response =
        super::queries::get_sheet_records::handle(&state, GetSheetRecordsQuery { name }).await?;

    tracing::info!(
        sheet = %response.name,
        records = response.records.len(),
        "Fetched sheet records"
    );

    Ok(ApiResponse::success(response))
}

impl From<GetSheetRecordsError> for ApiError {
    fn from(err: GetSheetRecordsError) -> Self {
        match err {
            GetSheetRecordsError::NotConfigured(_) => ApiError::unknown_source(err.to_string()),
            GetSheetRecordsError::Google { name, source } => {
                upstream_error(&format!("sheet '{}'", name), &source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::GoogleApiError;
    use axum::http::StatusCode;

    #[test]
    fn test_not_configured_is_404() {
        let err = ApiError::from(GetSheetRecordsError::NotConfigured("nope".to_string()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "SOURCE_NOT_FOUND");
        assert!(err.message.contains("nope"));
    }

    #[test]
    fn test_upstream_not_found_keeps_404() {
        let err = ApiError::from(GetSheetRecordsError::Google {
            name: "leaderboard".to_string(),
            source: GoogleApiError::upstream(StatusCode::NOT_FOUND, ""),
        });
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "NOT_FOUND");
    }
}
