use serde::{Deserialize, Serialize};

use crate::features::FeatureState;
use crate::google::GoogleApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDocumentTextQuery {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTextResponse {
    pub name: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetDocumentTextError {
    #[error("Document '{0}' is not configured")]
    NotConfigured(String),
    #[error("Failed to fetch document '{name}': {source}")]
    Google {
        name: String,
        #[source]
        source: GoogleApiError,
    },
}

#[tracing::instrument(skip(state))]
pub async fn handle(
    state: &FeatureState,
    query: GetDocumentTextQuery,
) -> Result<DocumentTextResponse, GetDocumentTextError> {
    let document = state
        .sources
        .document(&query.name)
        .ok_or_else(|| GetDocumentTextError::NotConfigured(query.name.clone()))?;

    let text = state
        .google
        .document_text(&document.document_id)
        .await
        .map_err(|err| GetDocumentTextError::Google {
            name: query.name.clone(),
            source: err,
        })?;

    Ok(DocumentTextResponse {
        name: query.name,
        text,
    })
}
