//! Error types for interchange operations.

use thiserror::Error;

/// Errors that can occur while rendering a resolution.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization error.
    #[error("YAML error: {0}")]
    Yaml(String),
}

impl InterchangeError {
    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    /// Create a YAML error.
    pub fn yaml(message: impl Into<String>) -> Self {
        Self::Yaml(message.into())
    }
}
