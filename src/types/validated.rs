//! Validation errors for values that enforce invariants at construction time

use thiserror::Error;

/// Validation errors for content type filters parsed from config or the CLI
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("unknown content type: {0}")]
    UnknownContentType(String),

    #[error("content type set cannot be empty")]
    EmptyContentTypes,
}
