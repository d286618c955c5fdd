//! Internal invariant violations.
//!
//! These are never user-input defects: they mean the grammar engine produced a
//! corrupt event stream, or the tree does not have a shape the grammar
//! guarantees. They abort the document instead of becoming diagnostics.

use rowan::TextRange;
use thiserror::Error;

use super::syntax_kind::SyntaxKind;

/// A corrupt enter/exit event stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("event stream is empty")]
    EmptyStream,

    #[error("exit of {kind:?} at offset {offset} has no matching enter")]
    UnbalancedExit { kind: SyntaxKind, offset: usize },

    #[error("exit of {found:?} at offset {offset} closes open {expected:?}")]
    MismatchedExit {
        expected: SyntaxKind,
        found: SyntaxKind,
        offset: usize,
    },

    #[error("second root {kind:?} entered at offset {offset}")]
    MultipleRoots { kind: SyntaxKind, offset: usize },

    #[error("offset {offset} precedes already consumed offset {cursor}")]
    OffsetRegression { offset: usize, cursor: usize },

    #[error("offset {offset} is outside the source text (length {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("{open} node(s) still open at end of stream")]
    UnclosedNodes { open: usize },
}

/// A tree node lacks structure the grammar guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("{parent:?} node at {range:?} is missing required {child} child")]
    MissingChild {
        parent: SyntaxKind,
        child: &'static str,
        range: TextRange,
    },

    #[error("{kind:?} literal `{text}` at {range:?} is malformed")]
    MalformedLiteral {
        kind: SyntaxKind,
        text: String,
        range: TextRange,
    },
}
