//! Shared helpers for router integration tests
//!
//! The Google APIs are replaced by a `wiremock::MockServer`; the router is
//! driven in-process with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use quizboard_server::{
    api,
    config::{Config, Credentials, SourcesConfig},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_TOKEN: &str = "test-token";

/// Config pointing both Google APIs at the mock server
pub fn test_config(server: &MockServer, sheets: &str, documents: &str) -> Config {
    let mut config = Config::default();
    config.google.sheets_base_url = format!("{}/v4", server.uri());
    config.google.docs_base_url = format!("{}/v1", server.uri());
    config.google.request_timeout_secs = 5;
    config.google.credentials = Some(Credentials::AccessToken(TEST_TOKEN.to_string()));
    config.sources = SourcesConfig::parse(sheets, documents).expect("valid test sources");
    config
}

pub fn test_app(config: &Config) -> Router {
    let state = api::build_state(config).expect("state builds");
    api::create_router(state, config)
}

/// Send a GET request and decode the JSON body
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, value)
}

/// Spreadsheet metadata listing worksheet titles in order
pub async fn mount_worksheets(server: &MockServer, spreadsheet_id: &str, titles: &[&str]) {
    let sheets: Vec<Value> = titles
        .iter()
        .map(|title| json!({ "properties": { "title": title } }))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{}", spreadsheet_id)))
        .and(query_param("fields", "sheets.properties.title"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sheets": sheets })))
        .mount(server)
        .await;
}

/// Cell values of a whole worksheet. Titles must not need percent-encoding.
pub async fn mount_values(server: &MockServer, spreadsheet_id: &str, title: &str, values: Value) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/v4/spreadsheets/{}/values/'{}'",
            spreadsheet_id, title
        )))
        .and(query_param("valueRenderOption", "UNFORMATTED_VALUE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": format!("'{}'!A1:Z1000", title),
            "majorDimension": "ROWS",
            "values": values,
        })))
        .mount(server)
        .await;
}

/// A document whose paragraphs each hold one text run
pub async fn mount_document(server: &MockServer, document_id: &str, paragraphs: &[&str]) {
    let content: Vec<Value> = paragraphs
        .iter()
        .map(|text| json!({ "paragraph": { "elements": [ { "textRun": { "content": text } } ] } }))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/v1/documents/{}", document_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentId": document_id,
            "title": "Notes",
            "body": { "content": content },
        })))
        .mount(server)
        .await;
}

/// Google-style error envelope for any GET under `path_prefix`
pub async fn mount_error(server: &MockServer, request_path: &str, status: u16, message: &str) {
    Mock::given(method("GET"))
        .and(path(request_path))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "error": { "code": status, "message": message, "status": "ERROR" }
        })))
        .mount(server)
        .await;
}
