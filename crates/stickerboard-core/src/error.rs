//! Error types for canvas operations.

use crate::overlay::OverlayId;
use kurbo::Rect;
use thiserror::Error;

/// Errors reported by the overlay store.
///
/// Both variants are recoverable: the interaction layer logs them and keeps
/// the previous state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    #[error("Unknown overlay: {0}")]
    UnknownOverlay(OverlayId),
    #[error("Invalid overlay geometry: {frame:?}")]
    InvalidGeometry { frame: Rect },
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
