//! Rowan-based concrete syntax tree for Smithy IDL
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Grammar engine (pest, smithy.pest) → enter/exit events
//!     ↓
//! Tree builder → GreenNode tree (trivia dropped, offsets kept)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```

pub mod ast;
pub mod builder;
pub mod errors;
pub mod grammar;
mod syntax_kind;

pub use ast::*;
pub use builder::{Event, build_tree};
pub use errors::{BuildError, InvariantError};
pub use grammar::{GrammarFailure, Rule, SmithyParser};
pub use syntax_kind::{
    SmithyLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};

/// Parse result: the tree, or the grammar engine's rejection
#[derive(Debug, Clone)]
pub struct Parse {
    green: Option<GreenNode>,
    pub errors: Vec<GrammarFailure>,
}

impl Parse {
    /// Get the root syntax node, if the grammar accepted the document
    pub fn syntax(&self) -> Option<SyntaxNode> {
        self.green.clone().map(SyntaxNode::new_root)
    }

    /// Get the typed root, if the grammar accepted the document
    pub fn tree(&self) -> Result<Option<Idl>, InvariantError> {
        let Some(root) = self.syntax() else {
            return Ok(None);
        };
        let range = root.text_range();
        let kind = root.kind();
        Idl::cast(root)
            .map(Some)
            .ok_or(InvariantError::MissingChild {
                parent: kind,
                child: "Idl",
                range,
            })
    }

    /// Check if the grammar accepted the document
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a Smithy IDL document into a CST.
///
/// A document the grammar rejects is not an error here: it yields a `Parse`
/// without a tree. Only a corrupt event stream is fatal.
pub fn parse_idl(text: &str) -> Result<Parse, BuildError> {
    match grammar::document_events(text) {
        Ok(events) => Ok(Parse {
            green: Some(build_tree(text, events)?),
            errors: Vec::new(),
        }),
        Err(failure) => Ok(Parse {
            green: None,
            errors: vec![failure],
        }),
    }
}
