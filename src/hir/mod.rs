//! High-level IR (HIR): symbol index, semantic resolver and output model.
//!
//! ## Key Types
//!
//! - [`ShapeIndex`] - Categorized name → shape tables for one document
//! - [`Resolver`] - Walks services, operations and members into the model
//! - [`ServiceModel`] - The resolved output
//! - [`Diagnostic`] - A recoverable user-input defect
//!
//! ## Layers
//!
//! ```text
//! Idl (typed CST)
//!     │
//!     ▼
//! ShapeIndex::build      ← one forward pass over the shape section
//!     │
//!     ▼
//! Resolver::resolve      ← services → operations → structures → members
//!     │
//!     ▼
//! Resolution { model, diagnostics }
//! ```

mod diagnostics;
mod http;
mod index;
mod members;
mod model;
mod options;
mod resolve;
mod rules;
mod scalar;
mod values;

pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollector, Severity};
pub use http::{HttpBinding, HttpPaths, HttpVerb};
pub use index::{ShapeCategory, ShapeIndex, ShapeRecord};
pub use model::{
    Deprecation, Enum, EnumKind, EnumLiteral, EnumValue, HttpMethod, HttpPath, Interface, Member,
    Method, Resolution, ReturnType, ServiceModel, Type, TypeName,
};
pub use options::ResolveOptions;
pub use resolve::{Resolver, leading_major_version};
pub use rules::{ValidationRule, translate as translate_rules};
pub use scalar::{
    SIMPLE_KEYWORDS, Scalar, from_simple_keyword, from_wrapper, is_expected_primitive,
    is_simple_keyword,
};
pub use values::{
    Number, PRELUDE_PREFIX, TraitApplicationValue, TraitBody, Value, find_trait, lower_traits,
};
