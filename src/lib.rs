//! # smithy-ir
//!
//! Front end that turns a Smithy IDL document into a typed service model plus
//! diagnostics. Every emitted name carries the source range it came from.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! hir       → Symbol index, resolver, output model, diagnostics
//!   ↓
//! parser    → Pest grammar engine, tree builder (rowan), typed syntax facade
//!   ↓
//! base      → LineIndex, Range (line/column + offsets)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let resolution = smithy_ir::resolve(text, "tasks.smithy")?;
//! for diagnostic in &resolution.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir)
// ============================================================================

/// Foundation types: LineIndex, Range, TextRange
pub mod base;

/// Parser: pest grammar, rowan tree builder, typed AST
pub mod parser;

/// High-level IR: symbol index, resolver, service model
pub mod hir;

/// Fatal front end errors
pub mod error;

/// JSON and YAML renderings of the model
#[cfg(feature = "interchange")]
pub mod interchange;

use rayon::prelude::*;

use hir::{DiagnosticCode, DiagnosticCollector, Resolver, ShapeIndex};
use parser::parse_idl;

// Re-export foundation types
pub use base::{LineCol, LineIndex, Range, TextRange, TextSize};
pub use error::FrontendError;
pub use hir::{Diagnostic, Resolution, ResolveOptions, ServiceModel, Severity};

/// Resolve one document with default options.
///
/// `Err` only signals an internal invariant violation; every defect in the
/// document itself is reported as a diagnostic on an `Ok` result.
pub fn resolve(text: &str, source_path: &str) -> Result<Resolution, FrontendError> {
    resolve_with_options(text, source_path, &ResolveOptions::default())
}

/// Resolve one document.
pub fn resolve_with_options(
    text: &str,
    source_path: &str,
    options: &ResolveOptions,
) -> Result<Resolution, FrontendError> {
    let parse = parse_idl(text)?;
    let line_index = LineIndex::new(text);

    let Some(idl) = parse.tree()? else {
        let mut diagnostics = DiagnosticCollector::new(source_path, &line_index);
        for failure in &parse.errors {
            diagnostics.report(
                DiagnosticCode::SyntaxError,
                failure.range,
                failure.message.clone(),
            );
        }
        tracing::debug!(source_path, "document rejected by the grammar");
        return Ok(Resolution {
            model: ServiceModel::empty(source_path, options.default_major_version),
            diagnostics: diagnostics.finish(),
        });
    };

    let index = ShapeIndex::build(&idl)?;
    Ok(Resolver::new(&index, &line_index, source_path, options).resolve()?)
}

/// Resolve independent documents in parallel.
///
/// Results are in input order. Documents share no state, so one failing
/// document does not affect the others.
pub fn resolve_all(
    documents: &[(&str, &str)],
    options: &ResolveOptions,
) -> Vec<Result<Resolution, FrontendError>> {
    documents
        .par_iter()
        .map(|(text, source_path)| resolve_with_options(text, source_path, options))
        .collect()
}
