//! Server-specific error types

use thiserror::Error;

use crate::google::GoogleApiError;

/// Result type alias for server operations
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Errors that stop the server from starting or serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Google client error: {0}")]
    Google(#[from] GoogleApiError),

    #[error("Invalid bind address '{0}'")]
    BindAddress(String),
}
