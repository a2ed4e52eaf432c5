//! Error types for stride operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrideError {
    /// An argument was outside the domain an operation accepts
    /// (e.g., a non-positive step passed to [`Period::every`](crate::Period::every)).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A datetime or duration string could not be parsed.
    /// Only surfaced by the strict parsing paths.
    #[error("Parse error for '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// A format string contained a directive the formatter does not understand.
    #[error("Invalid format string: {0}")]
    InvalidFormat(String),
}

impl StrideError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        StrideError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StrideError>;
