//! Google Sheets v4 endpoints

use quizboard_common::{records_from_rows, Record};
use serde::Deserialize;
use serde_json::Value;

use super::{GoogleApiError, GoogleClient};
use crate::config::SheetSource;

/// Cells of a range, row-major. Trailing empty rows and cells are omitted by
/// the API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// A1 range covering a whole worksheet
pub fn worksheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

impl GoogleClient {
    /// Title of the first worksheet in a spreadsheet
    pub async fn first_worksheet_title(
        &self,
        spreadsheet_id: &str,
    ) -> Result<String, GoogleApiError> {
        let url = self.sheets_url(&["spreadsheets", spreadsheet_id]);
        let metadata: SpreadsheetMetadata = self
            .get_json(url, &[("fields", "sheets.properties.title")])
            .await?;

        metadata
            .sheets
            .into_iter()
            .next()
            .map(|sheet| sheet.properties.title)
            .ok_or_else(|| GoogleApiError::EmptySpreadsheet(spreadsheet_id.to_string()))
    }

    /// Raw cell values of a range. Numbers and booleans come back typed.
    pub async fn worksheet_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<ValueRange, GoogleApiError> {
        let url = self.sheets_url(&["spreadsheets", spreadsheet_id, "values", range]);
        self.get_json(url, &[("valueRenderOption", "UNFORMATTED_VALUE")])
            .await
    }

    /// All records of a configured worksheet, keyed by its header row
    #[tracing::instrument(skip(self, source), fields(source = %source.name))]
    pub async fn sheet_records(&self, source: &SheetSource) -> Result<Vec<Record>, GoogleApiError> {
        let title = match &source.worksheet {
            Some(title) => title.clone(),
            None => self.first_worksheet_title(&source.spreadsheet_id).await?,
        };

        let values = self
            .worksheet_values(&source.spreadsheet_id, &worksheet_range(&title))
            .await?;
        let records = records_from_rows(&values.values);

        tracing::debug!(worksheet = %title, records = records.len(), "Fetched worksheet");

        Ok(records)
    }
}
