//! Common trait for output formats.

use super::InterchangeError;
use crate::hir::Resolution;

/// A serialization of a [`Resolution`] for downstream generators.
pub trait ModelFormat: Send + Sync {
    /// Human-readable name of the format.
    fn name(&self) -> &'static str;

    /// File extension(s) for this format.
    fn extensions(&self) -> &'static [&'static str];

    /// MIME type for this format.
    fn mime_type(&self) -> &'static str;

    /// Render a resolution to bytes.
    fn write(&self, resolution: &Resolution) -> Result<Vec<u8>, InterchangeError>;
}

/// JSON format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json {
    /// Indent the output
    pub pretty: bool,
}

impl ModelFormat for Json {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn write(&self, resolution: &Resolution) -> Result<Vec<u8>, InterchangeError> {
        let result = if self.pretty {
            serde_json::to_vec_pretty(resolution)
        } else {
            serde_json::to_vec(resolution)
        };
        result.map_err(|e| InterchangeError::json(e.to_string()))
    }
}
