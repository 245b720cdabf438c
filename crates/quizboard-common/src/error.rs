//! Error types for Quizboard

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizboardError>;

/// Errors raised while reading source declarations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuizboardError {
    #[error("Invalid source '{spec}': {reason}")]
    InvalidSourceSpec { spec: String, reason: String },

    #[error("Source name '{0}' is declared more than once")]
    DuplicateSource(String),
}
