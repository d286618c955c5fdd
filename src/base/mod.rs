//! Foundation types for the Smithy front end.
//!
//! This module provides position types shared by every layer:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`], [`LineCol`] - Offset to line/column conversion
//! - [`Range`] - One-based line/column plus byte offsets, as reported in output
//!
//! This module has NO dependencies on other crate modules.

mod line_index;
mod position;

pub use line_index::{LineCol, LineIndex};
pub use position::Range;

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
