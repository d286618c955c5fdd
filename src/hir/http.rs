//! HTTP protocol binding extraction.

use std::fmt;

use indexmap::IndexMap;
use rowan::TextRange;

use super::diagnostics::{DiagnosticCode, DiagnosticCollector};
use super::model::{HttpMethod, HttpPath};
use super::values::{Number, TraitApplicationValue, TraitBody, find_trait};
use crate::base::LineIndex;

/// HTTP verb of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "lowercase"))]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpVerb {
    /// Exact, case-sensitive match on the literal written in the trait.
    pub fn from_literal(literal: &str) -> Option<Self> {
        let verb = match literal {
            "GET" => HttpVerb::Get,
            "POST" => HttpVerb::Post,
            "PUT" => HttpVerb::Put,
            "PATCH" => HttpVerb::Patch,
            "DELETE" => HttpVerb::Delete,
            "HEAD" => HttpVerb::Head,
            "OPTIONS" => HttpVerb::Options,
            "TRACE" => HttpVerb::Trace,
            _ => return None,
        };
        Some(verb)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Patch => "patch",
            HttpVerb::Delete => "delete",
            HttpVerb::Head => "head",
            HttpVerb::Options => "options",
            HttpVerb::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A well-formed `@http` trait body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpBinding<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    pub code: Option<u16>,
    pub range: TextRange,
}

impl<'a> HttpBinding<'a> {
    /// Read the `@http` trait from an operation's traits.
    ///
    /// `None` when the trait is absent or its body is not a key/value list
    /// with string `method` and `uri` and an optional integer `code`.
    pub fn from_traits(traits: &'a [TraitApplicationValue]) -> Option<Self> {
        let application = find_trait(traits, "http")?;
        let TraitBody::Structure(_) = application.body.as_ref()? else {
            return None;
        };
        let body = application.body.as_ref()?;

        let method = body.field("method")?.as_str()?;
        let uri = body.field("uri")?.as_str()?;
        let code = match body.field("code") {
            None => None,
            Some(value) => match value.as_number()? {
                Number::Integer(n) => Some(u16::try_from(n).ok()?),
                Number::Float(_) => return None,
            },
        };

        Some(Self {
            method,
            uri,
            code,
            range: application.range,
        })
    }
}

/// Groups bindings by URI, in first-seen order.
#[derive(Debug, Default)]
pub struct HttpPaths {
    paths: IndexMap<String, Vec<HttpMethod>>,
}

impl HttpPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one operation's binding.
    pub fn add(
        &mut self,
        operation: &str,
        binding: &HttpBinding<'_>,
        default_code: u16,
        line_index: &LineIndex,
        diagnostics: &mut DiagnosticCollector<'_>,
    ) {
        let verb = HttpVerb::from_literal(binding.method).unwrap_or_else(|| {
            diagnostics.report(
                DiagnosticCode::UnsupportedHttpVerb,
                binding.range,
                format!(
                    "HTTP verb `{}` of operation `{operation}` is not supported, using GET",
                    binding.method
                ),
            );
            HttpVerb::Get
        });

        self.paths
            .entry(binding.uri.to_string())
            .or_default()
            .push(HttpMethod {
                verb,
                success_code: binding.code.unwrap_or(default_code),
                name: operation.to_string(),
                range: line_index.range(binding.range),
            });
    }

    pub fn finish(self) -> Vec<HttpPath> {
        self.paths
            .into_iter()
            .map(|(path, methods)| HttpPath { path, methods })
            .collect()
    }
}
