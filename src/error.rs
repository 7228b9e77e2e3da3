//! Error types for Bookshow
//!
//! All catalog and terminal failures funnel through one enum.

use thiserror::Error;

/// Main error type for Bookshow operations
#[derive(Error, Debug)]
pub enum BookshowError {
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned status {0} for query '{1}'")]
    CatalogStatus(u16, String),

    #[error("Failed to decode catalog payload: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize export: {0}")]
    Export(#[from] serde_json::Error),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for Bookshow operations
pub type Result<T> = std::result::Result<T, BookshowError>;

impl BookshowError {
    /// Whether this failure is absorbed into the placeholder fallback
    /// instead of being surfaced to the user.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            BookshowError::Http(_)
                | BookshowError::CatalogStatus(_, _)
                | BookshowError::Decode(_)
        )
    }
}
