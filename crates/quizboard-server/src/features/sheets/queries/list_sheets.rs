use serde::{Deserialize, Serialize};

use crate::config::SourcesConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worksheet: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSheetsResponse {
    pub sheets: Vec<SheetSummary>,
}

/// Configured sheets, in configuration order. Spreadsheet ids stay private.
pub fn handle(sources: &SourcesConfig) -> ListSheetsResponse {
    ListSheetsResponse {
        sheets: sources
            .sheets
            .iter()
            .map(|sheet| SheetSummary {
                name: sheet.name.clone(),
                worksheet: sheet.worksheet.clone(),
            })
            .collect(),
    }
}
