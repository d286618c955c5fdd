//! Output renderings of a resolved document.
//!
//! Downstream generators consume the model as JSON or YAML, with camelCase
//! field names:
//!
//! ```text
//! Resolution ──► ModelFormat::write ──► bytes
//!                  ├─ Json
//!                  └─ Yaml
//! ```

mod error;
mod format;
mod yaml;

pub use error::InterchangeError;
pub use format::{Json, ModelFormat};
pub use yaml::Yaml;

use crate::hir::Resolution;

/// Render a resolution as pretty-printed JSON.
pub fn to_json(resolution: &Resolution) -> Result<String, InterchangeError> {
    serde_json::to_string_pretty(resolution).map_err(|e| InterchangeError::json(e.to_string()))
}

/// Render a resolution as YAML.
pub fn to_yaml(resolution: &Resolution) -> Result<String, InterchangeError> {
    serde_yaml::to_string(resolution).map_err(|e| InterchangeError::yaml(e.to_string()))
}
