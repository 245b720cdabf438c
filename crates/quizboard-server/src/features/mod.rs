//! Feature modules implementing the Quizboard API
//!
//! Each feature is a vertical slice with its own `queries/` and `routes.rs`.
//! The service is read-only, so there are no commands.
//!
//! # Features
//!
//! - **sheets**: Records of individual configured worksheets
//! - **documents**: Text of individual configured documents
//! - **dashboard**: Every configured source in a single response

pub mod dashboard;
pub mod documents;
pub mod shared;
pub mod sheets;

use axum::Router;
use std::sync::Arc;

use crate::config::SourcesConfig;
use crate::google::GoogleClient;

/// Shared state for all feature routes
///
/// Built once at startup; cloning is cheap.
#[derive(Clone)]
pub struct FeatureState {
    /// Client for the Sheets and Docs APIs
    pub google: GoogleClient,
    /// Named sources the API exposes
    pub sources: Arc<SourcesConfig>,
}

impl FeatureState {
    pub fn new(google: GoogleClient, sources: SourcesConfig) -> Self {
        Self {
            google,
            sources: Arc::new(sources),
        }
    }
}

/// Creates the API router with all feature routes mounted
///
/// - `/sheets` - Worksheet records
/// - `/documents` - Document text
/// - `/dashboard` - Combined view
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/sheets", sheets::sheets_routes())
        .nest("/documents", documents::documents_routes())
        .nest("/dashboard", dashboard::dashboard_routes())
        .with_state(state)
}
