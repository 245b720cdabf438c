use crate::api::response::{ApiError, ApiResponse};
use crate::features::shared::upstream_error;
use crate::features::FeatureState;
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::queries::{
    DocumentTextResponse, GetDocumentTextError, GetDocumentTextQuery, ListDocumentsResponse,
};

pub fn documents_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_documents))
        .route("/:name", get(get_document_text))
}

async fn list_documents(State(state): State<FeatureState>) -> ApiResponse<ListDocumentsResponse> {
    ApiResponse::success(super::queries::list_documents::handle(&state.sources))
}

#[tracing::instrument(skip(state))]
async fn get_document_text(
    State(state): State<FeatureState>,
    Path(name): Path<String>,
) -> Result<ApiResponse<DocumentTextResponse>, ApiError> {
    let response =
        super::queries::get_document_text::handle(&state, GetDocumentTextQuery { name }).await?;

    tracing::info!(
        document = %response.name,
        bytes = response.text.len(),
        "Fetched document text"
    );

    Ok(ApiResponse::success(response))
}

impl From<GetDocumentTextError> for ApiError {
    fn from(err: GetDocumentTextError) -> Self {
        match err {
            GetDocumentTextError::NotConfigured(_) => ApiError::unknown_source(err.to_string()),
            GetDocumentTextError::Google { name, source } => {
                upstream_error(&format!("document '{}'", name), &source)
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
    fn test_missing_credentials_is_unavailable() {
        let err = ApiError::from(GetDocumentTextError::Google {
            name: "meeting_notes".to_string(),
            source: GoogleApiError::ConfigMissing("token".to_string()),
        });
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code, "CONFIG_MISSING");
        assert!(err.message.starts_with("document 'meeting_notes'"));
    }
}
