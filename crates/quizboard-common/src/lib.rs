//! Quizboard Common Library
//!
//! Shared types and utilities for the Quizboard workspace.
//!
//! # Overview
//!
//! - **Headers**: Header row normalization for spreadsheet-backed tables
//! - **Table**: Turning raw spreadsheet rows into keyed records
//! - **Logging**: Tracing subscriber setup shared by all binaries
//! - **Error Handling**: Common error and result types
//!
//! # Example
//!
//! ```
//! use quizboard_common::headers::normalize_headers;
//!
//! let headers = normalize_headers(&["Team", "", "Team"]);
//! assert_eq!(headers, vec!["Team", "Unnamed_Column", "Team_1"]);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod headers;
pub mod logging;
pub mod table;

// Re-export commonly used types
pub use error::{QuizboardError, Result};
pub use headers::{normalize_headers, UNNAMED_COLUMN};
pub use table::{records_from_rows, Record};
