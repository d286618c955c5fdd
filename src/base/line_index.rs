//! Offset → line/column conversion.

use std::sync::Arc;

use text_size::{TextRange, TextSize};

use super::Range;

/// Zero-based line and column (in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Precomputed line starts for one document.
///
/// Built once per document; each lookup is a binary search over the line
/// starts plus a character count within the line.
#[derive(Debug, Clone)]
pub struct LineIndex {
    text: Arc<str>,
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            text: Arc::from(text),
            line_starts,
        }
    }

    /// Number of lines in the document
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a zero-based line/column.
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(TextSize::of(&*self.text));
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let line_start = usize::from(self.line_starts[line]);
        let col = self
            .text
            .get(line_start..usize::from(offset))
            .map(|prefix| prefix.chars().count())
            .unwrap_or_else(|| usize::from(offset) - line_start);
        LineCol {
            line: line as u32,
            col: col as u32,
        }
    }

    /// Convert a text range to a one-based [`Range`].
    pub fn range(&self, range: TextRange) -> Range {
        let start = self.line_col(range.start());
        let end = self.line_col(range.end());
        Range {
            start_line: start.line + 1,
            start_col: start.col + 1,
            start_offset: range.start().into(),
            end_line: end.line + 1,
            end_col: end.col + 1,
            end_offset: range.end().into(),
        }
    }
}
