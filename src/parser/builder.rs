//! Tree builder: grammar events → rowan green tree.
//!
//! Consumes enter/exit events in depth-first order and assembles one rooted
//! tree. Trivia kinds are skipped entirely; the text they matched ends up in
//! the `TEXT` tokens of the surrounding node. Node linkage uses an explicit
//! frame stack, so nesting depth is bounded by memory, not the call stack.

use rowan::{GreenNode, GreenNodeBuilder};

use super::errors::BuildError;
use super::syntax_kind::SyntaxKind;

/// One grammar engine event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A rule started matching at `offset`
    Enter { kind: SyntaxKind, offset: usize },
    /// A rule finished matching; `offset` is its end
    Exit { kind: SyntaxKind, offset: usize },
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: SyntaxKind,
    offset: usize,
}

/// Build a green tree for `text` from its complete event stream.
pub fn build_tree<I>(text: &str, events: I) -> Result<GreenNode, BuildError>
where
    I: IntoIterator<Item = Event>,
{
    let mut builder = TreeBuilder::new(text);
    for event in events {
        match event {
            Event::Enter { kind, offset } => builder.enter(kind, offset)?,
            Event::Exit { kind, offset } => builder.exit(kind, offset)?,
        }
    }
    builder.finish()
}

struct TreeBuilder<'a> {
    text: &'a str,
    builder: GreenNodeBuilder<'static>,
    stack: Vec<Frame>,
    /// End of the text already attached to the tree
    cursor: usize,
    root_seen: bool,
}

impl<'a> TreeBuilder<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            builder: GreenNodeBuilder::new(),
            stack: Vec::new(),
            cursor: 0,
            root_seen: false,
        }
    }

    fn enter(&mut self, kind: SyntaxKind, offset: usize) -> Result<(), BuildError> {
        if kind.is_trivia() {
            return Ok(());
        }

        if self.stack.is_empty() {
            if self.root_seen {
                return Err(BuildError::MultipleRoots { kind, offset });
            }
            self.root_seen = true;
            // Rowan roots start at offset zero, so leading text goes into the root.
            self.builder.start_node(kind.into());
            self.attach_text(offset)?;
        } else {
            self.attach_text(offset)?;
            self.builder.start_node(kind.into());
        }

        self.stack.push(Frame { kind, offset });
        Ok(())
    }

    fn exit(&mut self, kind: SyntaxKind, offset: usize) -> Result<(), BuildError> {
        if kind.is_trivia() {
            return Ok(());
        }

        let frame = self
            .stack
            .pop()
            .ok_or(BuildError::UnbalancedExit { kind, offset })?;
        if frame.kind != kind {
            return Err(BuildError::MismatchedExit {
                expected: frame.kind,
                found: kind,
                offset,
            });
        }
        if offset < frame.offset {
            return Err(BuildError::OffsetRegression {
                offset,
                cursor: frame.offset,
            });
        }

        self.attach_text(offset)?;
        self.builder.finish_node();
        Ok(())
    }

    /// Attach `text[cursor..offset]` to the innermost open node.
    fn attach_text(&mut self, offset: usize) -> Result<(), BuildError> {
        if offset < self.cursor {
            return Err(BuildError::OffsetRegression {
                offset,
                cursor: self.cursor,
            });
        }
        if offset == self.cursor {
            return Ok(());
        }
        let slice = self
            .text
            .get(self.cursor..offset)
            .ok_or(BuildError::OffsetOutOfBounds {
                offset,
                len: self.text.len(),
            })?;
        self.builder.token(SyntaxKind::TEXT.into(), slice);
        self.cursor = offset;
        Ok(())
    }

    fn finish(self) -> Result<GreenNode, BuildError> {
        if !self.stack.is_empty() {
            return Err(BuildError::UnclosedNodes {
                open: self.stack.len(),
            });
        }
        if !self.root_seen {
            return Err(BuildError::EmptyStream);
        }
        Ok(self.builder.finish())
    }
}
