use serde::{Deserialize, Serialize};

use crate::config::SourcesConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDocumentsResponse {
    pub documents: Vec<DocumentSummary>,
}

pub fn handle(sources: &SourcesConfig) -> ListDocumentsResponse {
    ListDocumentsResponse {
        documents: sources
            .documents
            .iter()
            .map(|doc| DocumentSummary {
                name: doc.name.clone(),
            })
            .collect(),
    }
}
