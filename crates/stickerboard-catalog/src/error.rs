//! Catalog errors.

use thiserror::Error;

/// Message shown to the user whenever the catalog cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Unable to load stickers";

/// Catalog errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Failed to build catalog URL: {0}")]
    UrlBuild(String),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Unrecognized HTTP status code: {0}")]
    UnrecognizedStatus(u16),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Decoding error: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Text suitable for display. The details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(e: url::ParseError) -> Self {
        CatalogError::UrlBuild(e.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Transport(e.to_string())
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
