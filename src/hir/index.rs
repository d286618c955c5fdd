//! Symbol index: categorized name → shape tables.
//!
//! Built in one forward pass over the shape section so the resolver can follow
//! references in any order. Tables are never mutated after [`ShapeIndex::build`]
//! returns; iteration follows declaration order.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::values::{TraitApplicationValue, lower_traits};
use crate::parser::{
    AggregateShape, ApplyStatement, AstNode, EntityShape, EnumShape, Idl, InvariantError,
    OperationShape, ShapeDecl, SimpleShape,
};

/// Category a declared shape is routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeCategory {
    Simple,
    Enum,
    List,
    Map,
    Union,
    Structure,
    Service,
    Resource,
    Operation,
}

impl ShapeCategory {
    pub const ALL: [ShapeCategory; 9] = [
        ShapeCategory::Simple,
        ShapeCategory::Enum,
        ShapeCategory::List,
        ShapeCategory::Map,
        ShapeCategory::Union,
        ShapeCategory::Structure,
        ShapeCategory::Service,
        ShapeCategory::Resource,
        ShapeCategory::Operation,
    ];

    fn slot(self) -> usize {
        self as usize
    }

    fn of_aggregate(shape: &AggregateShape) -> Result<Self, InvariantError> {
        let category = match shape.type_name()?.text().as_str() {
            "list" => ShapeCategory::List,
            "map" => ShapeCategory::Map,
            "union" => ShapeCategory::Union,
            _ => ShapeCategory::Structure,
        };
        Ok(category)
    }

    fn of_entity(shape: &EntityShape) -> Result<Self, InvariantError> {
        let category = match shape.type_name()?.text().as_str() {
            "resource" => ShapeCategory::Resource,
            _ => ShapeCategory::Service,
        };
        Ok(category)
    }

    fn of(decl: &ShapeDecl) -> Result<Self, InvariantError> {
        match decl {
            ShapeDecl::Simple(_) => Ok(ShapeCategory::Simple),
            ShapeDecl::Enum(_) => Ok(ShapeCategory::Enum),
            ShapeDecl::Aggregate(shape) => Self::of_aggregate(shape),
            ShapeDecl::Entity(shape) => Self::of_entity(shape),
            ShapeDecl::Operation(_) => Ok(ShapeCategory::Operation),
        }
    }
}

/// One declared shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeRecord {
    pub category: ShapeCategory,
    pub name: SmolStr,
    /// Tree node, for lazy detail extraction
    pub decl: ShapeDecl,
}

/// Per-document shape tables.
#[derive(Debug, Clone, Default)]
pub struct ShapeIndex {
    namespace: Option<SmolStr>,
    tables: [IndexMap<SmolStr, ShapeRecord>; 9],
    traits: IndexMap<SmolStr, Vec<TraitApplicationValue>>,
    applies: Vec<ApplyStatement>,
}

impl ShapeIndex {
    /// Index every shape declared in `idl`.
    ///
    /// Duplicate identifiers silently replace the earlier record; the entry
    /// keeps its original position.
    pub fn build(idl: &Idl) -> Result<Self, InvariantError> {
        let mut index = ShapeIndex::default();
        let section = idl.shape_section()?;

        if let Some(statement) = section.namespace_statement() {
            index.namespace = Some(statement.namespace()?.text());
        }

        let Some(statements) = section.statements() else {
            return Ok(index);
        };

        for statement in statements.shapes() {
            let decl = statement.shape()?;
            let name = decl.name()?.text();
            let category = ShapeCategory::of(&decl)?;

            index
                .traits
                .insert(name.clone(), lower_traits(&statement.traits()?)?);
            let replaced = index.tables[category.slot()].insert(
                name.clone(),
                ShapeRecord {
                    category,
                    name: name.clone(),
                    decl,
                },
            );
            if replaced.is_some() {
                tracing::trace!(%name, ?category, "duplicate shape replaces earlier definition");
            }
        }
        index.applies = statements.applies().collect();

        tracing::debug!(
            namespace = index.namespace.as_deref().unwrap_or(""),
            shapes = index.len(),
            structures = index.tables[ShapeCategory::Structure.slot()].len(),
            services = index.tables[ShapeCategory::Service.slot()].len(),
            operations = index.tables[ShapeCategory::Operation.slot()].len(),
            "indexed shapes"
        );
        Ok(index)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Look up a shape by bare identifier or by `namespace#Name`.
    ///
    /// Absolute ids outside the document's namespace are never found.
    pub fn by_name(&self, category: ShapeCategory, name: &str) -> Option<&ShapeRecord> {
        let local = self.local_name(name)?;
        self.tables[category.slot()].get(local)
    }

    /// Find a shape in any category.
    pub fn lookup(&self, name: &str) -> Option<&ShapeRecord> {
        ShapeCategory::ALL
            .iter()
            .find_map(|category| self.by_name(*category, name))
    }

    /// Shapes of one category, in declaration order.
    pub fn iter(&self, category: ShapeCategory) -> impl Iterator<Item = &ShapeRecord> {
        self.tables[category.slot()].values()
    }

    /// Traits declared directly on the named shape.
    pub fn traits(&self, name: &str) -> &[TraitApplicationValue] {
        self.local_name(name)
            .and_then(|local| self.traits.get(local))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `apply` statements, in source order.
    pub fn applies(&self) -> &[ApplyStatement] {
        &self.applies
    }

    /// Total number of indexed shapes
    pub fn len(&self) -> usize {
        self.tables.iter().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn local_name<'n>(&self, name: &'n str) -> Option<&'n str> {
        match name.split_once('#') {
            None => Some(name),
            Some((namespace, local)) if Some(namespace) == self.namespace.as_deref() => {
                Some(local)
            }
            Some(_) => None,
        }
    }
}

impl ShapeRecord {
    pub fn range(&self) -> rowan::TextRange {
        self.decl.text_range()
    }

    pub fn as_simple(&self) -> Option<&SimpleShape> {
        match &self.decl {
            ShapeDecl::Simple(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumShape> {
        match &self.decl {
            ShapeDecl::Enum(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_aggregate(&self) -> Option<&AggregateShape> {
        match &self.decl {
            ShapeDecl::Aggregate(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&EntityShape> {
        match &self.decl {
            ShapeDecl::Entity(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_operation(&self) -> Option<&OperationShape> {
        match &self.decl {
            ShapeDecl::Operation(shape) => Some(shape),
            _ => None,
        }
    }
}
