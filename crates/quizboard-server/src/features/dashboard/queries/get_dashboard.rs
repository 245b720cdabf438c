use futures::future::try_join_all;
use quizboard_common::Record;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::features::FeatureState;
use crate::google::GoogleApiError;

#[derive(Debug, Clone, Copy, Default)]
pub struct GetDashboardQuery;

/// Every configured source keyed by its name. Names are unique across sheets
/// and documents; the serialized object lists all of them sorted by name.
#[derive(Debug, Clone, Default)]
pub struct DashboardResponse {
    pub sheets: BTreeMap<String, Vec<Record>>,
    pub documents: BTreeMap<String, String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum DashboardEntry<'a> {
    Records(&'a [Record]),
    Text(&'a str),
}

impl Serialize for DashboardResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries: BTreeMap<&str, DashboardEntry<'_>> = self
            .sheets
            .iter()
            .map(|(name, records)| (name.as_str(), DashboardEntry::Records(records)))
            .chain(
                self.documents
                    .iter()
                    .map(|(name, text)| (name.as_str(), DashboardEntry::Text(text))),
            )
            .collect();

        entries.serialize(serializer)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GetDashboardError {
    #[error("Failed to fetch sheet '{name}': {source}")]
    Sheet {
        name: String,
        #[source]
        source: GoogleApiError,
    },
    #[error("Failed to fetch document '{name}': {source}")]
    Document {
        name: String,
        #[source]
        source: GoogleApiError,
    },
}

/// Fetch all sheets and documents concurrently. The first failure aborts the
/// whole dashboard.
#[tracing::instrument(skip(state))]
pub async fn handle(
    state: &FeatureState,
    _query: GetDashboardQuery,
) -> Result<DashboardResponse, GetDashboardError> {
    let sheets = try_join_all(state.sources.sheets.iter().map(|sheet| async move {
        state
            .google
            .sheet_records(sheet)
            .await
            .map(|records| (sheet.name.clone(), records))
            .map_err(|err| GetDashboardError::Sheet {
                name: sheet.name.clone(),
                source: err,
            })
    }));

    let documents = try_join_all(state.sources.documents.iter().map(|doc| async move {
        state
            .google
            .document_text(&doc.document_id)
            .await
            .map(|text| (doc.name.clone(), text))
            .map_err(|err| GetDashboardError::Document {
                name: doc.name.clone(),
                source: err,
            })
    }));

    let (sheets, documents) = futures::try_join!(sheets, documents)?;

    Ok(DashboardResponse {
        sheets: sheets.into_iter().collect(),
        documents: documents.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_flattens_sources() {
        let mut response = DashboardResponse::default();
        let record = json!({ "Team": "Owls", "Score": 12 });
        response.sheets.insert(
            "leaderboard".to_string(),
            vec![serde_json::from_value(record).unwrap()],
        );
        response
            .documents
            .insert("meeting_notes".to_string(), "Bring pens\n".to_string());

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "leaderboard": [{ "Team": "Owls", "Score": 12 }],
                "meeting_notes": "Bring pens\n",
            })
        );
    }

    #[test]
    fn test_keys_are_sorted_across_sheets_and_documents() {
        let mut response = DashboardResponse::default();
        response.sheets.insert("zeta_scores".to_string(), Vec::new());
        response.sheets.insert("beta_plan".to_string(), Vec::new());
        response
            .documents
            .insert("alpha_notes".to_string(), "hi".to_string());
        response
            .documents
            .insert("gamma_notes".to_string(), String::new());

        let value = serde_json::to_value(&response).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["alpha_notes", "beta_plan", "gamma_notes", "zeta_scores"]
        );
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"alpha_notes":"hi","beta_plan":[],"gamma_notes":"","zeta_scores":[]}"#
        );
    }

    #[test]
    fn test_empty_dashboard_is_empty_object() {
        assert_eq!(
            serde_json::to_value(DashboardResponse::default()).unwrap(),
            json!({})
        );
    }
}
