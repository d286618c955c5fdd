//! Grammar engine binding.
//!
//! The Smithy IDL grammar lives in `smithy.pest` and is compiled by
//! `pest_derive`. This module only adapts pest's flattened token stream into
//! the enter/exit [`Event`]s consumed by the tree builder.

use pest::Parser;
use pest::iterators::Pairs;
use rowan::{TextRange, TextSize};

use super::builder::Event;
use super::syntax_kind::SyntaxKind;

#[derive(pest_derive::Parser)]
#[grammar = "parser/smithy.pest"]
pub struct SmithyParser;

/// Run the grammar engine over a whole document.
///
/// On success the full event stream is collected eagerly; on failure the
/// engine's message and failure range are returned.
pub fn document_events(text: &str) -> Result<Vec<Event>, GrammarFailure> {
    let pairs = SmithyParser::parse(Rule::idl, text).map_err(GrammarFailure::from_pest)?;
    Ok(events(pairs).collect())
}

/// Flatten matched pairs into enter/exit events in depth-first order.
pub fn events<'i>(pairs: Pairs<'i, Rule>) -> impl Iterator<Item = Event> + 'i {
    pairs.tokens().map(|token| match token {
        pest::Token::Start { rule, pos } => Event::Enter {
            kind: SyntaxKind::from(rule),
            offset: pos.pos(),
        },
        pest::Token::End { rule, pos } => Event::Exit {
            kind: SyntaxKind::from(rule),
            offset: pos.pos(),
        },
    })
}

/// The grammar engine rejected the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarFailure {
    pub message: String,
    pub range: TextRange,
}

impl GrammarFailure {
    fn from_pest(error: pest::error::Error<Rule>) -> Self {
        let range = match error.location {
            pest::error::InputLocation::Pos(pos) => TextRange::empty(offset(pos)),
            pest::error::InputLocation::Span((start, end)) => {
                TextRange::new(offset(start), offset(end.max(start)))
            }
        };
        Self {
            message: error.variant.message().into_owned(),
            range,
        }
    }
}

fn offset(pos: usize) -> TextSize {
    TextSize::new(u32::try_from(pos).unwrap_or(u32::MAX))
}
