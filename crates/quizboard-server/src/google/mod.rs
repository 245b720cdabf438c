//! Google Sheets / Docs REST client
//!
//! A thin read-only client over the two REST APIs the dashboard needs. One
//! [`GoogleClient`] is built at startup and cloned into request handlers; it
//! wraps a pooled `reqwest::Client`.
//!
//! Credentials are attached verbatim (bearer token or API key). Obtaining or
//! refreshing tokens happens outside this service.

pub mod docs;
pub mod sheets;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::{Credentials, GoogleConfig};

pub use docs::Document;
pub use sheets::ValueRange;

/// Errors from calls to Google APIs
#[derive(Debug, Error)]
pub enum GoogleApiError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Transport failure. The request URL is stripped since it may carry
    /// the API key.
    #[error("Network error contacting Google: {0}")]
    Network(reqwest::Error),

    #[error("Google API returned {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Unexpected response from Google: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Spreadsheet '{0}' has no worksheets")]
    EmptySpreadsheet(String),
}

impl From<reqwest::Error> for GoogleApiError {
    fn from(err: reqwest::Error) -> Self {
        GoogleApiError::Network(err.without_url())
    }
}

impl GoogleApiError {
    /// Build an upstream error, preferring the message from Google's error
    /// envelope over the raw body.
    pub fn upstream(status: StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            error: EnvelopeError,
        }

        #[derive(Deserialize)]
        struct EnvelopeError {
            message: String,
        }

        let message = match serde_json::from_str::<Envelope>(body) {
            Ok(envelope) => envelope.error.message,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("no response body")
                .to_string(),
            Err(_) => body.trim().to_string(),
        };

        GoogleApiError::Upstream { status, message }
    }
}

/// Read-only client for Google Sheets and Google Docs
#[derive(Clone)]
pub struct GoogleClient {
    http: Client,
    sheets_base: Url,
    docs_base: Url,
    credentials: Option<Credentials>,
}

impl GoogleClient {
    /// Create a client from configuration
    pub fn new(config: &GoogleConfig) -> Result<Self, GoogleApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("quizboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            sheets_base: parse_base(&config.sheets_base_url)?,
            docs_base: parse_base(&config.docs_base_url)?,
            credentials: config.credentials.clone(),
        })
    }

    /// Whether requests can be authorized at all
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn sheets_url(&self, segments: &[&str]) -> Url {
        join_segments(&self.sheets_base, segments)
    }

    fn docs_url(&self, segments: &[&str]) -> Url {
        join_segments(&self.docs_base, segments)
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, GoogleApiError> {
        match &self.credentials {
            Some(Credentials::AccessToken(token)) => Ok(request.bearer_auth(token)),
            Some(Credentials::ApiKey(key)) => Ok(request.query(&[("key", key)])),
            None => Err(GoogleApiError::ConfigMissing(
                "set GOOGLE_ACCESS_TOKEN or GOOGLE_API_KEY to call Google APIs".to_string(),
            )),
        }
    }

    /// Issue an authorized GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, GoogleApiError> {
        let request = self.authorize(self.http.get(url.clone()).query(query))?;

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body);
            tracing::warn!(%url, status = status.as_u16(), "Google API request failed");
            return Err(GoogleApiError::upstream(status, &body));
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

fn parse_base(raw: &str) -> Result<Url, GoogleApiError> {
    let url = Url::parse(raw)
        .map_err(|e| GoogleApiError::InvalidConfig(format!("'{}' is not a valid URL: {}", raw, e)))?;

    if url.cannot_be_a_base() {
        return Err(GoogleApiError::InvalidConfig(format!(
            "'{}' cannot be used as a base URL",
            raw
        )));
    }

    Ok(url)
}

/// Append percent-encoded path segments to a base URL
fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(credentials: Option<Credentials>) -> GoogleConfig {
        GoogleConfig {
            sheets_base_url: "https://sheets.example.com/v4/".to_string(),
            docs_base_url: "https://docs.example.com/v1".to_string(),
            request_timeout_secs: 5,
            credentials,
        }
    }

    #[test]
    fn test_join_segments_encodes_ids() {
        let client = GoogleClient::new(&config(None)).unwrap();
        let url = client.sheets_url(&["spreadsheets", "abc", "values", "'Round 1'"]);
        assert_eq!(
            url.as_str(),
            "https://sheets.example.com/v4/spreadsheets/abc/values/'Round%201'"
        );

        let url = client.docs_url(&["documents", "a/b"]);
        assert_eq!(url.as_str(), "https://docs.example.com/v1/documents/a%2Fb");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let mut cfg = config(None);
        cfg.docs_base_url = "mailto:someone@example.com".to_string();
        assert!(matches!(
            GoogleClient::new(&cfg),
            Err(GoogleApiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_authorize_without_credentials_fails() {
        let client = GoogleClient::new(&config(None)).unwrap();
        assert!(!client.has_credentials());
        let request = client.http.get("https://sheets.example.com/");
        assert!(matches!(
            client.authorize(request),
            Err(GoogleApiError::ConfigMissing(_))
        ));
    }

    #[test]
    fn test_authorize_with_api_key_adds_query() {
        let client =
            GoogleClient::new(&config(Some(Credentials::ApiKey("k123".to_string())))).unwrap();
        let request = client
            .authorize(client.http.get("https://sheets.example.com/x"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("key=k123"));
    }

    #[test]
    fn test_authorize_with_token_sets_header() {
        let client =
            GoogleClient::new(&config(Some(Credentials::AccessToken("tok".to_string())))).unwrap();
        let request = client
            .authorize(client.http.get("https://sheets.example.com/x"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer tok"
        );
    }

    #[tokio::test]
    async fn test_network_error_hides_api_key() {
        let mut cfg = config(Some(Credentials::ApiKey("k-secret-123".to_string())));
        // Port 1 is never listening
        cfg.docs_base_url = "http://127.0.0.1:1/v1".to_string();
        let client = GoogleClient::new(&cfg).unwrap();

        let err = client.document_text("doc-1").await.unwrap_err();
        assert!(matches!(err, GoogleApiError::Network(_)));
        assert!(!err.to_string().contains("k-secret-123"));
    }

    #[test]
    fn test_upstream_error_uses_envelope_message() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        match GoogleApiError::upstream(StatusCode::NOT_FOUND, body) {
            GoogleApiError::Upstream { status, message } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "Requested entity was not found.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_upstream_error_falls_back_to_body() {
        let err = GoogleApiError::upstream(StatusCode::BAD_GATEWAY, "  upstream down ");
        assert!(err.to_string().contains("upstream down"));

        let err = GoogleApiError::upstream(StatusCode::FORBIDDEN, "");
        assert!(err.to_string().contains("Forbidden"));
    }
}
