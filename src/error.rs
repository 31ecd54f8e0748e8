//! MediaFind Error Types
//!
//! The search core itself is total; these cover loading the catalog and config.

use thiserror::Error;

/// Central error type for MediaFind
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for MediaFind operations
pub type SearchResult<T> = Result<T, SearchError>;
