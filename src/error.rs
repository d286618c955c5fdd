//! Fatal errors of the front end.

use thiserror::Error;

use crate::parser::{BuildError, InvariantError};

/// An internal invariant violation. Never caused by the document's content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    /// The grammar engine produced a corrupt event stream.
    #[error("tree construction failed: {0}")]
    Build(#[from] BuildError),

    /// The tree lacks structure the grammar guarantees.
    #[error("syntax tree invariant violated: {0}")]
    Invariant(#[from] InvariantError),
}
