//! Error types for scraping operations.
//!
//! This module defines [`ScrapeError`] which covers every way an extraction
//! call can fail, and the mapping from each failure onto the wire
//! [`StatusCode`](crate::types::StatusCode).

use thiserror::Error;

use crate::types::StatusCode;

/// Errors that can occur while extracting data from a scraped page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    /// The table does not have the expected shape (missing header, missing
    /// body, or a column-count mismatch).
    #[error("{0}")]
    Structural(String),

    /// An unexpected fault while parsing. Carries the full diagnostic text.
    #[error("{0}")]
    Internal(String),

    /// The requested page type has no registered extractor.
    #[error("Unknown page type: {0}")]
    UnsupportedPageType(String),

    /// The page type is registered but its extractor is a placeholder.
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// A response payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Converting records into a DataFrame failed.
    #[error("Frame error: {0}")]
    Frame(String),
}

impl ScrapeError {
    /// Creates a structural error from any message.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }

    /// Creates an internal error from any message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the wire status this error is reported with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Structural(_) => StatusCode::ErrorParser,
            Self::UnsupportedPageType(_) | Self::NotSupported(_) => StatusCode::ErrorUnsupported,
            Self::Internal(_) | Self::Serialization(_) | Self::Frame(_) => {
                StatusCode::ErrorInternal
            }
        }
    }
}

impl From<serde_json::Error> for ScrapeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result type alias using [`ScrapeError`].
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ScrapeError::structural("No table header found").status(),
            StatusCode::ErrorParser
        );
        assert_eq!(
            ScrapeError::internal("boom").status(),
            StatusCode::ErrorInternal
        );
        assert_eq!(
            ScrapeError::UnsupportedPageType("income".into()).status(),
            StatusCode::ErrorUnsupported
        );
        assert_eq!(
            ScrapeError::NotSupported("balance sheet".into()).status(),
            StatusCode::ErrorUnsupported
        );
    }

    #[test]
    fn test_structural_message_is_bare() {
        let err = ScrapeError::structural("No table body found");
        assert_eq!(err.to_string(), "No table body found");
    }
}
