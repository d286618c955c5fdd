//! Output service model.
//!
//! Everything here is created during one resolution run and never mutated
//! afterwards. Every emitted name carries the [`Range`] it came from.

use crate::base::Range;

use super::diagnostics::Diagnostic;
use super::http::HttpVerb;
use super::rules::ValidationRule;
use super::scalar::Scalar;

/// Root of the resolved model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct ServiceModel {
    pub source_path: String,
    pub title: String,
    pub major_version: u32,
    pub interfaces: Vec<Interface>,
    pub types: Vec<Type>,
    pub enums: Vec<Enum>,
    /// Union shapes are indexed but never emitted; always empty.
    pub unions: Vec<Type>,
}

impl ServiceModel {
    /// A model with no content, as produced for a rejected document.
    pub fn empty(source_path: &str, major_version: u32) -> Self {
        Self {
            source_path: source_path.to_string(),
            title: String::new(),
            major_version,
            interfaces: Vec::new(),
            types: Vec::new(),
            enums: Vec::new(),
            unions: Vec::new(),
        }
    }

    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub fn type_named(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn enum_named(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// One service.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct Interface {
    pub name: String,
    pub http_paths: Vec<HttpPath>,
    pub methods: Vec<Method>,
    pub range: Range,
}

impl Interface {
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn http_path(&self, path: &str) -> Option<&HttpPath> {
        self.http_paths.iter().find(|p| p.path == path)
    }
}

/// All bindings sharing one URI.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct HttpPath {
    pub path: String,
    pub methods: Vec<HttpMethod>,
}

/// One operation bound to a verb on a path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct HttpMethod {
    pub verb: HttpVerb,
    pub success_code: u16,
    /// Name of the bound operation
    pub name: String,
    pub range: Range,
}

/// One operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct Method {
    pub name: String,
    pub deprecated: Option<Deprecation>,
    pub parameters: Vec<Member>,
    pub return_type: Option<ReturnType>,
    pub range: Range,
}

/// A `@deprecated` trait.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct Deprecation {
    /// Range of the trait application
    pub range: Range,
    pub message: Option<String>,
    pub since: Option<String>,
}

/// The type a member refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(
    feature = "interchange",
    serde(tag = "kind", content = "name", rename_all = "camelCase")
)]
pub enum TypeName {
    Scalar(Scalar),
    /// A user-defined shape, carried by name
    Shape(String),
}

impl TypeName {
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            TypeName::Scalar(scalar) => Some(*scalar),
            TypeName::Shape(_) => None,
        }
    }

    pub fn as_shape(&self) -> Option<&str> {
        match self {
            TypeName::Shape(name) => Some(name),
            TypeName::Scalar(_) => None,
        }
    }
}

/// A parameter or property.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct Member {
    pub name: String,
    pub is_array: bool,
    pub is_primitive: bool,
    /// Absent when the member's type could not be determined
    pub type_name: Option<TypeName>,
    pub rules: Vec<ValidationRule>,
    pub range: Range,
}

/// Output structure of an operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct ReturnType {
    pub type_name: String,
    pub rules: Vec<ValidationRule>,
    pub range: Range,
}

/// A structure shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct Type {
    pub name: String,
    pub deprecated: Option<Deprecation>,
    pub properties: Vec<Member>,
    pub range: Range,
}

impl Type {
    pub fn property(&self, name: &str) -> Option<&Member> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub enum EnumKind {
    Enum,
    IntEnum,
}

/// An `enum` or `intEnum` shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct Enum {
    pub name: String,
    pub kind: EnumKind,
    pub deprecated: Option<Deprecation>,
    pub values: Vec<EnumValue>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct EnumValue {
    pub name: String,
    /// Value from `= ...`, if assigned
    pub value: Option<EnumLiteral>,
    pub deprecated: Option<Deprecation>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(untagged))]
pub enum EnumLiteral {
    String(String),
    Integer(i64),
}

/// Result of resolving one document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct Resolution {
    pub model: ServiceModel,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}
