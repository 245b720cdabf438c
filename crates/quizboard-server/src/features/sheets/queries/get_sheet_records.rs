use quizboard_common::Record;
use serde::{Deserialize, Serialize};

use crate::features::FeatureState;
use crate::google::GoogleApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSheetRecordsQuery {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetRecordsResponse {
    pub name: String,
    pub records: Vec<Record>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetSheetRecordsError {
    #[error("Sheet '{0}' is not configured")]
    NotConfigured(String),
    #[error("Failed to fetch sheet '{name}': {source}")]
    Google {
        name: String,
        #[source]
        source: GoogleApiError,
    },
}

#[tracing::instrument(skip(state))]
pub async fn handle(
    state: &FeatureState,
    query: GetSheetRecordsQuery,
) -> Result<SheetRecordsResponse, GetSheetRecordsError> {
    let source = state
        .sources
        .sheet(&query.name)
        .ok_or_else(|| GetSheetRecordsError::NotConfigured(query.name.clone()))?;

    let records = state
        .google
        .sheet_records(source)
        .await
        .map_err(|err| GetSheetRecordsError::Google {
            name: query.name.clone(),
            source: err,
        })?;

    Ok(SheetRecordsResponse {
        name: query.name,
        records,
    })
}
