//! Node values and trait applications lowered out of the CST.

use rowan::TextRange;
use smol_str::SmolStr;

use crate::parser::{
    AstNode, InvariantError, NodeKeyword, NodeValue, NodeValueKind, StringValueKind, SyntaxKind,
    TraitApplication, TraitStatements,
};

/// Prelude namespace prefix, stripped from trait ids.
pub const PRELUDE_PREFIX: &str = "smithy.api#";

/// A numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(untagged))]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Integer(n) => Some(n),
            Number::Float(_) => None,
        }
    }
}

/// A lowered node value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted text or a text block
    String(String),
    /// An unquoted shape id
    ShapeId(SmolStr),
    Number(Number),
    Bool(bool),
    Null,
    Array(Vec<Value>),
    /// Entries in source order
    Object(Vec<(SmolStr, Value)>),
}

impl Value {
    pub fn lower(node: &NodeValue) -> Result<Self, InvariantError> {
        match node.kind()? {
            NodeValueKind::Array(array) => array
                .values()
                .map(|value| Value::lower(&value))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            NodeValueKind::Object(object) => {
                let mut entries = Vec::new();
                for entry in object.entries() {
                    entries.push((entry.key()?.name()?, Value::lower(&entry.value()?)?));
                }
                Ok(Value::Object(entries))
            }
            NodeValueKind::Number(number) => lower_number(&number.text(), number.text_range())
                .map(Value::Number),
            NodeValueKind::Keyword(keyword) => lower_keyword(&keyword),
            NodeValueKind::String(string) => match string.kind()? {
                StringValueKind::TextBlock(block) => block.value().map(Value::String),
                StringValueKind::Quoted(quoted) => quoted.value().map(Value::String),
                StringValueKind::ShapeId(id) => Ok(Value::ShapeId(id.text())),
            },
        }
    }

    /// Quoted text only; unquoted shape ids do not count as strings
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Object entries, if this is an object
    pub fn as_entries(&self) -> Option<&[(SmolStr, Value)]> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }
}

fn lower_number(text: &str, range: TextRange) -> Result<Number, InvariantError> {
    let is_integral = !text.contains(['.', 'e', 'E']);
    if is_integral {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Number::Integer(n));
        }
    }
    text.parse::<f64>()
        .map(Number::Float)
        .map_err(|_| InvariantError::MalformedLiteral {
            kind: SyntaxKind::NUMBER,
            text: text.to_string(),
            range,
        })
}

fn lower_keyword(keyword: &NodeKeyword) -> Result<Value, InvariantError> {
    match keyword.text().as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        "null" => Ok(Value::Null),
        other => Err(InvariantError::MalformedLiteral {
            kind: SyntaxKind::NODE_KEYWORD,
            text: other.to_string(),
            range: keyword.text_range(),
        }),
    }
}

// ============================================================================
// Traits
// ============================================================================

/// The body of a trait application.
#[derive(Debug, Clone, PartialEq)]
pub enum TraitBody {
    /// `@trait(value)`
    Value(Value),
    /// `@trait(key: value, ...)`
    Structure(Vec<(SmolStr, Value)>),
}

impl TraitBody {
    /// Key/value entries of a structured body or an object value
    pub fn entries(&self) -> Option<&[(SmolStr, Value)]> {
        match self {
            TraitBody::Structure(entries) => Some(entries),
            TraitBody::Value(value) => value.as_entries(),
        }
    }

    /// Last value bound to `key`
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.entries()?
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

/// One `@trait` applied to a shape or member.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitApplicationValue {
    /// Trait id with the prelude namespace stripped
    pub id: SmolStr,
    pub body: Option<TraitBody>,
    /// Text between the quotes, escapes kept, when the body is one quoted string
    pub verbatim: Option<String>,
    pub range: TextRange,
}

impl TraitApplicationValue {
    pub fn lower(application: &TraitApplication) -> Result<Self, InvariantError> {
        let written = application.id()?;
        let id = written
            .strip_prefix(PRELUDE_PREFIX)
            .map(SmolStr::new)
            .unwrap_or(written);

        let mut verbatim = None;
        let body = match application.body() {
            None => None,
            Some(body) => {
                if let Some(structure) = body.structure() {
                    let mut entries = Vec::new();
                    for entry in structure.entries() {
                        entries.push((entry.key()?.name()?, Value::lower(&entry.value()?)?));
                    }
                    Some(TraitBody::Structure(entries))
                } else {
                    match body.value() {
                        Some(value) => {
                            verbatim = quoted_raw(&value)?;
                            Some(TraitBody::Value(Value::lower(&value)?))
                        }
                        // `@trait()` carries no body
                        None => None,
                    }
                }
            }
        };

        Ok(Self {
            id,
            body,
            verbatim,
            range: application.text_range(),
        })
    }
}

fn quoted_raw(node: &NodeValue) -> Result<Option<String>, InvariantError> {
    let NodeValueKind::String(string) = node.kind()? else {
        return Ok(None);
    };
    match string.kind()? {
        StringValueKind::Quoted(quoted) => quoted.raw().map(Some),
        _ => Ok(None),
    }
}

/// Lower every trait of a trait statement list, in source order.
pub fn lower_traits(
    statements: &TraitStatements,
) -> Result<Vec<TraitApplicationValue>, InvariantError> {
    statements
        .traits()
        .map(|application| TraitApplicationValue::lower(&application))
        .collect()
}

/// Find the last trait with the given id.
pub fn find_trait<'a>(
    traits: &'a [TraitApplicationValue],
    id: &str,
) -> Option<&'a TraitApplicationValue> {
    traits.iter().rev().find(|t| t.id == id)
}
