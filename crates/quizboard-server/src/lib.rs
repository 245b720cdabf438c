//! Quizboard Server Library
//!
//! HTTP service that turns Google Sheets and Google Docs into JSON for a
//! trivia night dashboard.
//!
//! # Overview
//!
//! - **Sources**: Named worksheets (leaderboard, planning, ...) and documents
//!   (meeting notes, ...) are declared in configuration
//! - **Sheets**: Each worksheet is returned as records keyed by its normalized
//!   header row
//! - **Documents**: Each document is returned as plain text
//! - **Dashboard**: All sources in one response
//!
//! # Architecture
//!
//! Feature slices under [`features`] each own their `queries/` and
//! `routes.rs`. Upstream access goes through [`google::GoogleClient`], which is
//! built once at startup and shared through [`features::FeatureState`].
//!
//! ## Framework Stack
//!
//! - **Axum**: Routing and extraction
//! - **Tower / tower-http**: Tracing, CORS and compression layers
//! - **Reqwest**: Upstream HTTP client
//!
//! # Example
//!
//! ```no_run
//! use quizboard_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod google;
pub mod middleware;

// Re-export commonly used types
pub use error::{ServerError, ServerResult};
