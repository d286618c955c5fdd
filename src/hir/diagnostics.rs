//! Diagnostics: user-input defects found while resolving one document.
//!
//! Every defect is recoverable. The resolver appends one diagnostic and keeps
//! going with the offending construct omitted or defaulted.

use std::fmt;

use indexmap::IndexSet;
use rowan::TextRange;

use crate::base::{LineIndex, Range};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// The defect dropped information from the model
    Error,
    /// Informational or unsupported-feature notice
    Info,
}

/// Stable diagnostic codes that downstream tooling matches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    SyntaxError,
    OperationNotDefined,
    UnsupportedHttpVerb,
    UnsupportedFeature,
    UnknownReturnType,
    UnexpectedElision,
    MissingListMember,
    UnknownTrait,
    UnsupportedSimpleType,
    UnknownPrimitive,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::SyntaxError => "syntax-error",
            DiagnosticCode::OperationNotDefined => "operation-not-defined",
            DiagnosticCode::UnsupportedHttpVerb => "unsupported-http-verb",
            DiagnosticCode::UnsupportedFeature => "unsupported-feature",
            DiagnosticCode::UnknownReturnType => "unknown-return-type",
            DiagnosticCode::UnexpectedElision => "unexpected-elision",
            DiagnosticCode::MissingListMember => "missing-list-member",
            DiagnosticCode::UnknownTrait => "unknown-trait",
            DiagnosticCode::UnsupportedSimpleType => "unsupported-simple-type",
            DiagnosticCode::UnknownPrimitive => "unknown-primitive",
        }
    }

    /// Severity every diagnostic with this code is reported at.
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::UnsupportedFeature | DiagnosticCode::UnknownTrait => Severity::Info,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "interchange")]
impl serde::Serialize for DiagnosticCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    pub severity: Severity,
    /// Path of the document, as given by the caller.
    pub source_path: String,
    pub range: Range,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Info => "info",
        };
        write!(
            f,
            "{}:{}:{}: {}[{}]: {}",
            self.source_path,
            self.range.start_line,
            self.range.start_col,
            level,
            self.code,
            self.message
        )
    }
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during one resolution run.
///
/// Scoped to a single document: it is created by the resolver and consumed
/// when the run finishes. Exact duplicates are reported once.
#[derive(Debug)]
pub struct DiagnosticCollector<'a> {
    source_path: &'a str,
    line_index: &'a LineIndex,
    diagnostics: IndexSet<Diagnostic>,
}

impl<'a> DiagnosticCollector<'a> {
    pub fn new(source_path: &'a str, line_index: &'a LineIndex) -> Self {
        Self {
            source_path,
            line_index,
            diagnostics: IndexSet::new(),
        }
    }

    /// Add a diagnostic at `range`, with the code's own severity.
    pub fn report(&mut self, code: DiagnosticCode, range: TextRange, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            code,
            message: message.into(),
            severity: code.severity(),
            source_path: self.source_path.to_string(),
            range: self.line_index.range(range),
        };
        if !self.diagnostics.insert(diagnostic) {
            tracing::trace!(%code, "duplicate diagnostic suppressed");
        }
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consume the collector, yielding diagnostics in report order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics.into_iter().collect()
    }
}
