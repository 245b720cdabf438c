//! Configuration management

use quizboard_common::{QuizboardError, Result as CommonResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Google Sheets REST API root.
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// Google Docs REST API root.
pub const DEFAULT_DOCS_BASE_URL: &str = "https://docs.googleapis.com/v1";

/// Default timeout for a single upstream request in seconds.
pub const DEFAULT_GOOGLE_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub google: GoogleConfig,
    pub sources: SourcesConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// Google API access configuration
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub sheets_base_url: String,
    pub docs_base_url: String,
    pub request_timeout_secs: u64,
    /// `None` leaves the service running; every upstream call then fails
    /// with a missing-configuration error.
    pub credentials: Option<Credentials>,
}

/// How requests to Google are authorized
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// OAuth access token, sent as `Authorization: Bearer <token>`
    AccessToken(String),
    /// API key, sent as the `key` query parameter. Only works for
    /// publicly shared files.
    ApiKey(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            Credentials::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
        }
    }
}

impl Credentials {
    /// Pick credentials from the environment, preferring an access token.
    pub fn from_env() -> Option<Self> {
        non_empty_var("GOOGLE_ACCESS_TOKEN")
            .map(Credentials::AccessToken)
            .or_else(|| non_empty_var("GOOGLE_API_KEY").map(Credentials::ApiKey))
    }
}

/// A worksheet exposed under a configured name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSource {
    pub name: String,
    pub spreadsheet_id: String,
    /// Worksheet title; the first worksheet is used when absent.
    pub worksheet: Option<String>,
}

impl SheetSource {
    /// Parse `name=spreadsheet_id` or `name=spreadsheet_id!Worksheet Title`.
    pub fn parse(spec: &str) -> CommonResult<Self> {
        let (name, target) = split_named(spec)?;

        let (spreadsheet_id, worksheet) = match target.split_once('!') {
            Some((id, worksheet)) => (id.trim(), Some(worksheet.trim())),
            None => (target, None),
        };

        if spreadsheet_id.is_empty() {
            return Err(invalid(spec, "missing spreadsheet id"));
        }
        if worksheet.is_some_and(str::is_empty) {
            return Err(invalid(spec, "worksheet title after '!' is empty"));
        }

        Ok(Self {
            name: name.to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            worksheet: worksheet.map(str::to_string),
        })
    }
}

/// A document exposed under a configured name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSource {
    pub name: String,
    pub document_id: String,
}

impl DocumentSource {
    /// Parse `name=document_id`.
    pub fn parse(spec: &str) -> CommonResult<Self> {
        let (name, document_id) = split_named(spec)?;

        if document_id.is_empty() {
            return Err(invalid(spec, "missing document id"));
        }

        Ok(Self {
            name: name.to_string(),
            document_id: document_id.to_string(),
        })
    }
}

/// Named sheets and documents the dashboard serves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub sheets: Vec<SheetSource>,
    pub documents: Vec<DocumentSource>,
}

impl SourcesConfig {
    /// Parse comma separated source lists.
    ///
    /// Names must be unique across sheets and documents since the dashboard
    /// response uses them as keys of a single object.
    pub fn parse(sheets: &str, documents: &str) -> CommonResult<Self> {
        let sheets = split_list(sheets)
            .map(SheetSource::parse)
            .collect::<CommonResult<Vec<_>>>()?;
        let documents = split_list(documents)
            .map(DocumentSource::parse)
            .collect::<CommonResult<Vec<_>>>()?;

        let mut names = HashSet::new();
        for name in sheets
            .iter()
            .map(|s| &s.name)
            .chain(documents.iter().map(|d| &d.name))
        {
            if !names.insert(name.as_str()) {
                return Err(QuizboardError::DuplicateSource(name.clone()));
            }
        }

        Ok(Self { sheets, documents })
    }

    /// Load from `QUIZBOARD_SHEETS` and `QUIZBOARD_DOCUMENTS`
    pub fn from_env() -> CommonResult<Self> {
        Self::parse(
            &std::env::var("QUIZBOARD_SHEETS").unwrap_or_default(),
            &std::env::var("QUIZBOARD_DOCUMENTS").unwrap_or_default(),
        )
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetSource> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn document(&self, name: &str) -> Option<&DocumentSource> {
        self.documents.iter().find(|d| d.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty() && self.documents.is_empty()
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn split_named(spec: &str) -> CommonResult<(&str, &str)> {
    let (name, target) = spec
        .split_once('=')
        .ok_or_else(|| invalid(spec, "expected 'name=id'"))?;
    let (name, target) = (name.trim(), target.trim());

    if name.is_empty() {
        return Err(invalid(spec, "missing source name"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid(
            spec,
            "source names may only contain letters, digits, '_' and '-'",
        ));
    }

    Ok((name, target))
}

fn invalid(spec: &str, reason: &str) -> QuizboardError {
    QuizboardError::InvalidSourceSpec {
        spec: spec.to_string(),
        reason: reason.to_string(),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `None` when unset or blank, an error when set but unparseable
fn parsed_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_var(key) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e)),
    }
}

impl Config {
    /// Load configuration from the process environment and defaults.
    ///
    /// `.env` handling is left to the caller so that an explicit env file
    /// replaces `./.env` instead of being merged with it.
    pub fn load() -> anyhow::Result<Self> {
        let config = Config {
            server: ServerConfig {
                host: std::env::var("QUIZBOARD_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: parsed_var("QUIZBOARD_PORT")?.unwrap_or(DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: parsed_var("QUIZBOARD_SHUTDOWN_TIMEOUT")?
                    .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: parsed_var("CORS_ALLOW_CREDENTIALS")?.unwrap_or(false),
            },
            google: GoogleConfig {
                sheets_base_url: std::env::var("GOOGLE_SHEETS_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_SHEETS_BASE_URL.to_string()),
                docs_base_url: std::env::var("GOOGLE_DOCS_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DOCS_BASE_URL.to_string()),
                request_timeout_secs: parsed_var("GOOGLE_REQUEST_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_GOOGLE_REQUEST_TIMEOUT_SECS),
                credentials: Credentials::from_env(),
            },
            sources: SourcesConfig::from_env()?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        for (key, value) in [
            ("GOOGLE_SHEETS_BASE_URL", &self.google.sheets_base_url),
            ("GOOGLE_DOCS_BASE_URL", &self.google.docs_base_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| anyhow::anyhow!("{} is not a valid URL ({}): {}", key, value, e))?;
        }

        if self.google.request_timeout_secs == 0 {
            anyhow::bail!("Google request timeout must be greater than 0");
        }

        if self.google.credentials.is_none() {
            tracing::warn!(
                "Neither GOOGLE_ACCESS_TOKEN nor GOOGLE_API_KEY is set - upstream requests will fail"
            );
        }

        if self.sources.is_empty() {
            tracing::warn!("No sheets or documents configured - the dashboard will be empty");
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: false,
            },
            google: GoogleConfig {
                sheets_base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
                docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
                request_timeout_secs: DEFAULT_GOOGLE_REQUEST_TIMEOUT_SECS,
                credentials: None,
            },
            sources: SourcesConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheet_without_worksheet() {
        let sheet = SheetSource::parse("leaderboard=1w_2js9ct36PBR3").unwrap();
        assert_eq!(sheet.name, "leaderboard");
        assert_eq!(sheet.spreadsheet_id, "1w_2js9ct36PBR3");
        assert_eq!(sheet.worksheet, None);
    }

    #[test]
    fn test_parse_sheet_with_worksheet() {
        let sheet = SheetSource::parse(" planning = abc123 ! Round Plan ").unwrap();
        assert_eq!(sheet.name, "planning");
        assert_eq!(sheet.spreadsheet_id, "abc123");
        assert_eq!(sheet.worksheet.as_deref(), Some("Round Plan"));
    }

    #[test]
    fn test_parse_sheet_rejects_bad_specs() {
        assert!(SheetSource::parse("abc123").is_err());
        assert!(SheetSource::parse("=abc123").is_err());
        assert!(SheetSource::parse("leaderboard=").is_err());
        assert!(SheetSource::parse("leaderboard=abc!").is_err());
        assert!(SheetSource::parse("leader board=abc").is_err());
    }

    #[test]
    fn test_parse_document() {
        let doc = DocumentSource::parse("meeting_notes=1ow0HJ-jpqpBOlM").unwrap();
        assert_eq!(doc.name, "meeting_notes");
        assert_eq!(doc.document_id, "1ow0HJ-jpqpBOlM");
        assert!(DocumentSource::parse("meeting_notes").is_err());
    }

    #[test]
    fn test_sources_parse_lists() {
        let sources = SourcesConfig::parse(
            "leaderboard=aaa, planning=bbb!Plan,",
            "meeting_notes=ccc",
        )
        .unwrap();

        assert_eq!(sources.sheets.len(), 2);
        assert_eq!(sources.documents.len(), 1);
        assert_eq!(sources.sheet("planning").unwrap().spreadsheet_id, "bbb");
        assert_eq!(sources.document("meeting_notes").unwrap().document_id, "ccc");
        assert!(sources.sheet("meeting_notes").is_none());
    }

    #[test]
    fn test_sources_empty_lists() {
        let sources = SourcesConfig::parse("", " , ").unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn test_sources_reject_duplicate_names() {
        let err = SourcesConfig::parse("notes=aaa", "notes=bbb").unwrap_err();
        assert!(matches!(err, QuizboardError::DuplicateSource(name) if name == "notes"));

        assert!(SourcesConfig::parse("a=1,a=2", "").is_err());
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials::AccessToken("ya29.secret".to_string());
        assert!(!format!("{:?}", creds).contains("secret"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.google.sheets_base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    // Each test uses its own variable names so parallel tests never race.
    #[test]
    fn test_parsed_var_unset_or_blank_is_none() {
        std::env::remove_var("QUIZBOARD_TEST_UNSET_PORT");
        assert_eq!(parsed_var::<u16>("QUIZBOARD_TEST_UNSET_PORT").unwrap(), None);

        std::env::set_var("QUIZBOARD_TEST_BLANK_PORT", "  ");
        assert_eq!(parsed_var::<u16>("QUIZBOARD_TEST_BLANK_PORT").unwrap(), None);
    }

    #[test]
    fn test_parsed_var_reads_values() {
        std::env::set_var("QUIZBOARD_TEST_GOOD_PORT", " 9090 ");
        assert_eq!(parsed_var::<u16>("QUIZBOARD_TEST_GOOD_PORT").unwrap(), Some(9090));

        std::env::set_var("QUIZBOARD_TEST_GOOD_FLAG", "true");
        assert_eq!(parsed_var::<bool>("QUIZBOARD_TEST_GOOD_FLAG").unwrap(), Some(true));
    }

    #[test]
    fn test_parsed_var_rejects_garbage() {
        std::env::set_var("QUIZBOARD_TEST_BAD_PORT", "eighty");
        let err = parsed_var::<u16>("QUIZBOARD_TEST_BAD_PORT").unwrap_err();
        assert!(err.to_string().contains("QUIZBOARD_TEST_BAD_PORT"));
        assert!(err.to_string().contains("eighty"));

        std::env::set_var("QUIZBOARD_TEST_BAD_FLAG", "yes");
        assert!(parsed_var::<bool>("QUIZBOARD_TEST_BAD_FLAG").is_err());

        std::env::set_var("QUIZBOARD_TEST_BAD_TIMEOUT", "-5");
        assert!(parsed_var::<u64>("QUIZBOARD_TEST_BAD_TIMEOUT").is_err());
    }
}
