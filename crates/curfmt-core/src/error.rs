//! Error types for currency formatting

use thiserror::Error;

/// Errors surfaced by the formatting pipeline.
///
/// An unknown country or currency code is not an error; it resolves to
/// the default separators and an empty symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Unknown option key, unknown numbering system, or an unusable value
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The embedded country table could not be parsed
    #[error("currency metadata unavailable: {0}")]
    Metadata(String),
}

impl FormatError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FormatError::InvalidArgument(msg.into())
    }
}

pub type Result<T, E = FormatError> = std::result::Result<T, E>;
