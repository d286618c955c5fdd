//! YAML format support.
//!
//! Same structure as the JSON rendering, in YAML syntax:
//!
//! ```yaml
//! model:
//!   sourcePath: tasks.smithy
//!   title: Task
//!   majorVersion: 1
//!   interfaces:
//!   - name: Task
//! diagnostics: []
//! ```

use super::{InterchangeError, ModelFormat};
use crate::hir::Resolution;

/// YAML format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl ModelFormat for Yaml {
    fn name(&self) -> &'static str {
        "YAML"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn mime_type(&self) -> &'static str {
        "application/x-yaml"
    }

    fn write(&self, resolution: &Resolution) -> Result<Vec<u8>, InterchangeError> {
        serde_yaml::to_string(resolution)
            .map(String::into_bytes)
            .map_err(|e| InterchangeError::yaml(e.to_string()))
    }
}
