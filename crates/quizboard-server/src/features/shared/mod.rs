//! Helpers shared by feature slices

pub mod upstream;

pub use upstream::{google_error_status, upstream_error};
