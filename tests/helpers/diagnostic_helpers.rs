//! Diagnostic assertion helpers.

use smithy_ir::hir::{Diagnostic, DiagnosticCode, Severity};

/// Diagnostics with the given code.
pub fn with_code(diagnostics: &[Diagnostic], code: DiagnosticCode) -> Vec<&Diagnostic> {
    diagnostics.iter().filter(|d| d.code == code).collect()
}

/// Count diagnostics with the given code.
pub fn count(diagnostics: &[Diagnostic], code: DiagnosticCode) -> usize {
    with_code(diagnostics, code).len()
}

/// Assert that no error-level diagnostic was produced.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    assert!(
        errors.is_empty(),
        "Expected no errors, got {} error(s):\n{}",
        errors.len(),
        errors
            .iter()
            .map(|e| format!("  {e}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
