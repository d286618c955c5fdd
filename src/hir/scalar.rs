//! Built-in type tables.
//!
//! Two closed, deterministic tables map IDL type names to semantic scalars:
//! lowercase simple-type keywords and capitalized prelude wrapper names.

use std::fmt;

use super::values::PRELUDE_PREFIX;

/// Semantic scalar type of a primitive member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "kebab-case"))]
pub enum Scalar {
    String,
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    Binary,
    Number,
    DateTime,
}

impl Scalar {
    pub fn as_str(self) -> &'static str {
        match self {
            Scalar::String => "string",
            Scalar::Boolean => "boolean",
            Scalar::Integer => "integer",
            Scalar::Long => "long",
            Scalar::Float => "float",
            Scalar::Double => "double",
            Scalar::Binary => "binary",
            Scalar::Number => "number",
            Scalar::DateTime => "date-time",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every simple-type keyword the grammar accepts.
pub const SIMPLE_KEYWORDS: &[&str] = &[
    "blob",
    "boolean",
    "document",
    "string",
    "byte",
    "short",
    "integer",
    "long",
    "float",
    "double",
    "bigInteger",
    "bigDecimal",
    "timestamp",
];

/// Prelude names that are not wrappers but still denote built-in types.
const PRELUDE_BUILTINS: &[&str] = &[
    "Document",
    "Unit",
    "PrimitiveBoolean",
    "PrimitiveByte",
    "PrimitiveShort",
    "PrimitiveInteger",
    "PrimitiveLong",
    "PrimitiveFloat",
    "PrimitiveDouble",
];

pub fn is_simple_keyword(name: &str) -> bool {
    SIMPLE_KEYWORDS.contains(&name)
}

/// Map a simple-type keyword. `None` means unsupported (`document` included).
pub fn from_simple_keyword(keyword: &str) -> Option<Scalar> {
    let scalar = match keyword {
        "string" => Scalar::String,
        "boolean" => Scalar::Boolean,
        "integer" => Scalar::Integer,
        "long" => Scalar::Long,
        "float" | "short" => Scalar::Float,
        "double" => Scalar::Double,
        "blob" => Scalar::Binary,
        "byte" | "bigDecimal" => Scalar::Number,
        "bigInteger" => Scalar::Long,
        "timestamp" => Scalar::DateTime,
        _ => return None,
    };
    Some(scalar)
}

/// Map a prelude wrapper name, with or without the `smithy.api#` prefix.
pub fn from_wrapper(name: &str) -> Option<Scalar> {
    let scalar = match name.strip_prefix(PRELUDE_PREFIX).unwrap_or(name) {
        "Boolean" => Scalar::Boolean,
        "String" => Scalar::String,
        "Integer" => Scalar::Number,
        "Long" => Scalar::Long,
        "Float" | "Short" => Scalar::Float,
        "Double" => Scalar::Double,
        "Byte" => Scalar::Integer,
        "BigInteger" => Scalar::Long,
        "BigDecimal" => Scalar::Double,
        "Timestamp" => Scalar::DateTime,
        "Blob" => Scalar::Binary,
        _ => return None,
    };
    Some(scalar)
}

/// Whether `name` can only denote a built-in type.
///
/// True for anything in the prelude namespace and for prelude names that
/// have no wrapper mapping.
pub fn is_expected_primitive(name: &str) -> bool {
    name.starts_with(PRELUDE_PREFIX) || PRELUDE_BUILTINS.contains(&name)
}
