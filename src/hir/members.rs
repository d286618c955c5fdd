//! Member and type resolution.
//!
//! A member's type is found with one level of indirection: built-in keyword,
//! prelude wrapper, list (unwrapped once), simple-shape alias (unwrapped
//! once), then an opaque reference to a user-defined shape.

use rowan::TextRange;
use smol_str::SmolStr;

use super::diagnostics::DiagnosticCode;
use super::index::{ShapeCategory, ShapeRecord};
use super::model::{Member, TypeName};
use super::resolve::Resolver;
use super::rules;
use super::scalar::{self, Scalar};
use super::values::{TraitApplicationValue, lower_traits};
use crate::parser::{AstNode, InvariantError, MemberDecl, Mixins, ShapeMember};

/// Outcome of resolving one type reference.
#[derive(Debug, Clone, PartialEq)]
struct ResolvedType {
    is_array: bool,
    is_primitive: bool,
    type_name: Option<TypeName>,
    /// Traits picked up while unwrapping, ahead of the reference's own
    traits: Vec<TraitApplicationValue>,
}

impl ResolvedType {
    fn scalar(scalar: Scalar) -> Self {
        Self {
            is_array: false,
            is_primitive: true,
            type_name: Some(TypeName::Scalar(scalar)),
            traits: Vec::new(),
        }
    }

    fn named(name: &str) -> Self {
        Self {
            is_array: false,
            is_primitive: false,
            type_name: Some(TypeName::Shape(name.to_string())),
            traits: Vec::new(),
        }
    }
}

/// A member's target after following elision.
struct Target {
    id: SmolStr,
    /// Traits inherited from the mixin member an elided member copies
    inherited: Vec<TraitApplicationValue>,
}

impl<'a> Resolver<'a> {
    /// Resolve every member of a structure, in declaration order.
    pub(super) fn resolve_structure_members(
        &mut self,
        structure: &ShapeRecord,
    ) -> Result<Vec<Member>, InvariantError> {
        let Some(shape) = structure.as_aggregate() else {
            return Ok(Vec::new());
        };
        let mixins = shape.mixins();
        let mut members = Vec::new();
        for member in shape.members()?.members() {
            members.push(self.resolve_member(mixins.as_ref(), &member)?);
        }
        Ok(members)
    }

    fn resolve_member(
        &mut self,
        mixins: Option<&Mixins>,
        member: &ShapeMember,
    ) -> Result<Member, InvariantError> {
        let decl = member.decl()?;
        let name = decl.name()?.text();
        let own_traits = lower_traits(&member.traits()?)?;
        let range = member.text_range();

        let resolved = match self.member_target(mixins, &decl)? {
            Some(target) => {
                let mut resolved = self.resolve_type(&target.id, range, true)?;
                resolved.traits.extend(target.inherited);
                resolved
            }
            None => {
                self.report_elision(&name, range);
                ResolvedType {
                    is_array: false,
                    is_primitive: false,
                    type_name: None,
                    traits: Vec::new(),
                }
            }
        };

        let mut traits = resolved.traits;
        traits.extend(own_traits);
        Ok(Member {
            name: name.to_string(),
            is_array: resolved.is_array,
            is_primitive: resolved.is_primitive,
            type_name: resolved.type_name,
            rules: rules::translate(&traits, &mut self.diagnostics),
            range: self.range(range),
        })
    }

    /// Target of an explicit member, or of the mixin member an elided one names.
    fn member_target(
        &self,
        mixins: Option<&Mixins>,
        decl: &MemberDecl,
    ) -> Result<Option<Target>, InvariantError> {
        let elided = match decl {
            MemberDecl::Explicit(explicit) => {
                return Ok(Some(Target {
                    id: explicit.target()?.text(),
                    inherited: Vec::new(),
                }));
            }
            MemberDecl::Elided(elided) => elided.name()?.text(),
        };

        let Some(mixins) = mixins else {
            return Ok(None);
        };
        for mixin in mixins.targets() {
            let Some(record) = self.index.lookup(&mixin.text()) else {
                continue;
            };
            let Some(shape) = record.as_aggregate() else {
                continue;
            };
            for candidate in shape.members()?.members() {
                // One level only: the mixin's own member must be explicit.
                if let MemberDecl::Explicit(explicit) = candidate.decl()? {
                    if explicit.name()?.text() == elided {
                        return Ok(Some(Target {
                            id: explicit.target()?.text(),
                            inherited: lower_traits(&candidate.traits()?)?,
                        }));
                    }
                }
            }
        }
        Ok(None)
    }

    fn report_elision(&mut self, name: &str, range: TextRange) {
        self.diagnostics.report(
            DiagnosticCode::UnexpectedElision,
            range,
            format!("elided member `${name}` does not match a member of any mixin"),
        );
    }

    /// Resolve a type reference written at `reference`.
    ///
    /// `allow_list` is false for list elements, so lists unwrap one level.
    fn resolve_type(
        &mut self,
        id: &str,
        reference: TextRange,
        allow_list: bool,
    ) -> Result<ResolvedType, InvariantError> {
        let index = self.index;

        if scalar::is_simple_keyword(id) {
            return Ok(ResolvedType::scalar(self.simple_keyword(id, reference)));
        }
        if let Some(scalar) = scalar::from_wrapper(id) {
            return Ok(ResolvedType::scalar(scalar));
        }
        if allow_list {
            if let Some(list) = index.by_name(ShapeCategory::List, id) {
                return self.unwrap_list(list);
            }
        }
        if let Some(alias) = index.by_name(ShapeCategory::Simple, id) {
            return self.unwrap_alias(alias);
        }
        if scalar::is_expected_primitive(id) {
            self.diagnostics.report(
                DiagnosticCode::UnknownPrimitive,
                reference,
                format!("`{id}` is not a known primitive type, using string"),
            );
            return Ok(ResolvedType::scalar(Scalar::String));
        }
        Ok(ResolvedType::named(id))
    }

    fn unwrap_list(&mut self, list: &ShapeRecord) -> Result<ResolvedType, InvariantError> {
        let index = self.index;
        let mut traits = index.traits(&list.name).to_vec();
        let missing = |traits: Vec<TraitApplicationValue>| ResolvedType {
            is_array: true,
            is_primitive: false,
            type_name: None,
            traits,
        };

        let Some(shape) = list.as_aggregate() else {
            return Ok(missing(traits));
        };
        let Some(element) = shape.members()?.members().next() else {
            self.diagnostics.report(
                DiagnosticCode::MissingListMember,
                list.range(),
                format!("list `{}` declares no member", list.name),
            );
            return Ok(missing(traits));
        };

        let decl = element.decl()?;
        let element_traits = lower_traits(&element.traits()?)?;
        let Some(target) = self.member_target(shape.mixins().as_ref(), &decl)? else {
            self.report_elision(&decl.name()?.text(), element.text_range());
            traits.extend(element_traits);
            return Ok(missing(traits));
        };

        tracing::trace!(list = %list.name, element = %target.id, "unwrapping list");
        let resolved = self.resolve_type(&target.id, element.text_range(), false)?;
        traits.extend(resolved.traits);
        traits.extend(target.inherited);
        traits.extend(element_traits);
        Ok(ResolvedType {
            is_array: true,
            is_primitive: resolved.is_primitive,
            type_name: resolved.type_name,
            traits,
        })
    }

    fn unwrap_alias(&mut self, alias: &ShapeRecord) -> Result<ResolvedType, InvariantError> {
        let Some(shape) = alias.as_simple() else {
            return Ok(ResolvedType::named(&alias.name));
        };
        let keyword = shape.type_name()?.text();
        tracing::trace!(alias = %alias.name, %keyword, "unwrapping simple alias");

        let mut resolved = ResolvedType::scalar(self.simple_keyword(&keyword, alias.range()));
        resolved.traits = self.index.traits(&alias.name).to_vec();
        Ok(resolved)
    }

    /// Map a simple-type keyword, falling back to string when unsupported.
    fn simple_keyword(&mut self, keyword: &str, range: TextRange) -> Scalar {
        scalar::from_simple_keyword(keyword).unwrap_or_else(|| {
            self.diagnostics.report(
                DiagnosticCode::UnsupportedSimpleType,
                range,
                format!("simple type `{keyword}` is not supported, using string"),
            );
            Scalar::String
        })
    }
}
