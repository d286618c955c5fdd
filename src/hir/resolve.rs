//! Semantic resolver: index + tree → service model.
//!
//! Walks services, then their operations, then each operation's input and
//! output structures and their members. User-input defects are reported to a
//! run-scoped [`DiagnosticCollector`]; only tree invariant violations abort.

use rowan::TextRange;
use smol_str::SmolStr;

use super::diagnostics::{DiagnosticCode, DiagnosticCollector};
use super::http::{HttpBinding, HttpPaths};
use super::index::{ShapeCategory, ShapeIndex, ShapeRecord};
use super::model::{
    Deprecation, Enum, EnumKind, EnumLiteral, EnumValue, Interface, Method, Resolution,
    ReturnType, ServiceModel, Type,
};
use super::options::ResolveOptions;
use super::rules;
use super::values::{Number, TraitApplicationValue, TraitBody, Value, find_trait, lower_traits};
use crate::base::{LineIndex, Range};
use crate::parser::{AstNode, InvariantError, NodeValueKind, OperationTarget};

/// Resolves one indexed document.
pub struct Resolver<'a> {
    pub(super) index: &'a ShapeIndex,
    pub(super) options: &'a ResolveOptions,
    pub(super) line_index: &'a LineIndex,
    pub(super) diagnostics: DiagnosticCollector<'a>,
    source_path: &'a str,
}

/// The parts of a service shape the model header is derived from.
struct ServiceHeader {
    interface: String,
    title: Option<String>,
    version: Option<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        index: &'a ShapeIndex,
        line_index: &'a LineIndex,
        source_path: &'a str,
        options: &'a ResolveOptions,
    ) -> Self {
        Self {
            index,
            options,
            line_index,
            diagnostics: DiagnosticCollector::new(source_path, line_index),
            source_path,
        }
    }

    /// Resolve the whole document.
    pub fn resolve(mut self) -> Result<Resolution, InvariantError> {
        let index = self.index;
        let mut interfaces = Vec::new();
        let mut header = None;
        for service in index.iter(ShapeCategory::Service) {
            let (interface, service_header) = self.resolve_interface(service)?;
            header.get_or_insert(service_header);
            interfaces.push(interface);
        }

        let mut types = Vec::new();
        for structure in index.iter(ShapeCategory::Structure) {
            types.push(self.resolve_structure(structure)?);
        }

        let mut enums = Vec::new();
        for shape in index.iter(ShapeCategory::Enum) {
            enums.push(self.resolve_enum(shape)?);
        }

        for apply in index.applies() {
            let target = apply.target()?.text();
            self.diagnostics.report(
                DiagnosticCode::UnsupportedFeature,
                apply.text_range(),
                format!("`apply` to `{target}` is not supported and is ignored"),
            );
        }

        let title = header
            .as_ref()
            .map(|h| h.title.clone().unwrap_or_else(|| h.interface.clone()))
            .or_else(|| index.namespace().map(str::to_string))
            .unwrap_or_default();
        let major_version = header
            .as_ref()
            .and_then(|h| h.version.as_deref())
            .and_then(leading_major_version)
            .unwrap_or(self.options.default_major_version);

        tracing::debug!(
            source_path = self.source_path,
            interfaces = interfaces.len(),
            types = types.len(),
            enums = enums.len(),
            diagnostics = self.diagnostics.len(),
            "resolved document"
        );

        Ok(Resolution {
            model: ServiceModel {
                source_path: self.source_path.to_string(),
                title,
                major_version,
                interfaces,
                types,
                enums,
                unions: Vec::new(),
            },
            diagnostics: self.diagnostics.finish(),
        })
    }

    pub(super) fn range(&self, range: TextRange) -> Range {
        self.line_index.range(range)
    }

    // ========================================================================
    // Services
    // ========================================================================

    fn resolve_interface(
        &mut self,
        service: &ShapeRecord,
    ) -> Result<(Interface, ServiceHeader), InvariantError> {
        let index = self.index;
        let name = self.options.interface_name(&service.name).to_string();
        let mut operations = Vec::new();
        let mut version = None;

        if let Some(shape) = service.as_entity() {
            let body = shape.body()?;
            if let Some(listing) = body.get("operations")? {
                if let NodeValueKind::Array(array) = listing.kind()? {
                    for element in array.values() {
                        let Some(id) = shape_reference(&Value::lower(&element)?) else {
                            continue;
                        };
                        match index.by_name(ShapeCategory::Operation, &id) {
                            Some(operation) => operations.push(operation),
                            None => self.diagnostics.report(
                                DiagnosticCode::OperationNotDefined,
                                element.text_range(),
                                format!(
                                    "operation `{id}` listed by service `{}` is not defined",
                                    service.name
                                ),
                            ),
                        }
                    }
                }
            }
            if let Some(value) = body.get("version")? {
                version = Value::lower(&value)?.as_str().map(str::to_string);
            }
        }

        let mut paths = HttpPaths::new();
        for operation in &operations {
            if let Some(binding) = HttpBinding::from_traits(index.traits(&operation.name)) {
                paths.add(
                    &operation.name,
                    &binding,
                    self.options.default_success_code,
                    self.line_index,
                    &mut self.diagnostics,
                );
            } else {
                tracing::trace!(operation = %operation.name, "no usable http binding");
            }
        }

        let mut methods = Vec::with_capacity(operations.len());
        for operation in &operations {
            methods.push(self.resolve_method(operation)?);
        }

        let title = find_trait(index.traits(&service.name), "title")
            .and_then(|t| match t.body.as_ref()? {
                TraitBody::Value(value) => value.as_str().map(str::to_string),
                TraitBody::Structure(_) => None,
            });

        let header = ServiceHeader {
            interface: name.clone(),
            title,
            version,
        };
        let interface = Interface {
            name,
            http_paths: paths.finish(),
            methods,
            range: self.range(service.range()),
        };
        Ok((interface, header))
    }

    // ========================================================================
    // Operations
    // ========================================================================

    fn resolve_method(&mut self, operation: &ShapeRecord) -> Result<Method, InvariantError> {
        let index = self.index;
        let deprecated = self.deprecation(self.index.traits(&operation.name));
        let mut parameters = Vec::new();
        let mut return_type = None;

        if let Some(shape) = operation.as_operation() {
            let body = shape.body()?;

            if let Some(input) = body.input() {
                match input.target()? {
                    OperationTarget::Inline(inline) => {
                        self.inline_not_supported(&operation.name, "input", inline.text_range())
                    }
                    OperationTarget::Named(id) => {
                        let id = id.text();
                        match index.by_name(ShapeCategory::Structure, &id) {
                            Some(structure) => {
                                parameters = self.resolve_structure_members(structure)?
                            }
                            None => tracing::trace!(%id, "input is not a structure"),
                        }
                    }
                }
            }

            if let Some(output) = body.output() {
                match output.target()? {
                    OperationTarget::Inline(inline) => {
                        self.inline_not_supported(&operation.name, "output", inline.text_range())
                    }
                    OperationTarget::Named(id) => {
                        let reference_traits = lower_traits(&output.traits()?)?;
                        return_type = self.resolve_return_type(
                            &operation.name,
                            &id.text(),
                            id.text_range(),
                            reference_traits,
                        );
                    }
                }
            }
        }

        Ok(Method {
            name: operation.name.to_string(),
            deprecated,
            parameters,
            return_type,
            range: self.range(operation.range()),
        })
    }

    fn resolve_return_type(
        &mut self,
        operation: &str,
        id: &str,
        range: TextRange,
        reference_traits: Vec<TraitApplicationValue>,
    ) -> Option<ReturnType> {
        let Some(structure) = self.index.by_name(ShapeCategory::Structure, id) else {
            self.diagnostics.report(
                DiagnosticCode::UnknownReturnType,
                range,
                format!("output `{id}` of operation `{operation}` is not a known structure"),
            );
            return None;
        };

        let mut traits = self.index.traits(&structure.name).to_vec();
        traits.extend(reference_traits);
        Some(ReturnType {
            type_name: structure.name.to_string(),
            rules: rules::translate(&traits, &mut self.diagnostics),
            range: self.range(range),
        })
    }

    fn inline_not_supported(&mut self, operation: &str, role: &str, range: TextRange) {
        self.diagnostics.report(
            DiagnosticCode::UnsupportedFeature,
            range,
            format!("inline {role} of operation `{operation}` is not supported and is ignored"),
        );
    }

    // ========================================================================
    // Types and enums
    // ========================================================================

    fn resolve_structure(&mut self, structure: &ShapeRecord) -> Result<Type, InvariantError> {
        Ok(Type {
            name: structure.name.to_string(),
            deprecated: self.deprecation(self.index.traits(&structure.name)),
            properties: self.resolve_structure_members(structure)?,
            range: self.range(structure.range()),
        })
    }

    fn resolve_enum(&mut self, record: &ShapeRecord) -> Result<Enum, InvariantError> {
        let deprecated = self.deprecation(self.index.traits(&record.name));
        let mut kind = EnumKind::Enum;
        let mut values = Vec::new();

        if let Some(shape) = record.as_enum() {
            if shape.type_name()?.text() == "intEnum" {
                kind = EnumKind::IntEnum;
            }
            for member in shape.members()?.members() {
                let traits = lower_traits(&member.traits()?)?;
                let value = match member.value() {
                    Some(assignment) => enum_literal(&Value::lower(&assignment.value()?)?),
                    None => None,
                };
                values.push(EnumValue {
                    name: member.name()?.text().to_string(),
                    value,
                    deprecated: self.deprecation(&traits),
                    range: self.range(member.text_range()),
                });
            }
        }

        Ok(Enum {
            name: record.name.to_string(),
            kind,
            deprecated,
            values,
            range: self.range(record.range()),
        })
    }

    fn deprecation(&self, traits: &[TraitApplicationValue]) -> Option<Deprecation> {
        let application = find_trait(traits, "deprecated")?;
        let field = |key: &str| {
            application
                .body
                .as_ref()
                .and_then(|body| body.field(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Some(Deprecation {
            range: self.range(application.range),
            message: field("message"),
            since: field("since"),
        })
    }
}

/// An operation listing entry: an unquoted shape id or a quoted name.
fn shape_reference(value: &Value) -> Option<SmolStr> {
    match value {
        Value::ShapeId(id) => Some(id.clone()),
        Value::String(name) => Some(SmolStr::new(name)),
        _ => None,
    }
}

fn enum_literal(value: &Value) -> Option<EnumLiteral> {
    match value {
        Value::String(s) => Some(EnumLiteral::String(s.clone())),
        Value::Number(Number::Integer(n)) => Some(EnumLiteral::Integer(*n)),
        _ => None,
    }
}

/// Leading integer of a version string, ignoring one leading `v`.
pub fn leading_major_version(version: &str) -> Option<u32> {
    let version = version.trim();
    let version = version.strip_prefix(['v', 'V']).unwrap_or(version);
    let end = version
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(version.len());
    version[..end].parse().ok()
}
