//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode of one rule kind; sum types cover children
//! that may be one of several kinds. Structure the grammar guarantees is
//! reached through [`required`], which reports a missing child as an
//! [`InvariantError`] instead of a user-facing diagnostic.

use std::marker::PhantomData;

use rowan::TextRange;
use smol_str::SmolStr;

use super::errors::InvariantError;
use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxNodeChildren};
use crate::base::{LineIndex, Range};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    fn text_range(&self) -> TextRange {
        self.syntax().text_range()
    }

    /// Line/column range, computed on demand from the node's offsets
    fn range(&self, index: &LineIndex) -> Range {
        index.range(self.text_range())
    }
}

// ============================================================================
// Generic child accessors
// ============================================================================

/// The first child of kind `N`, if any.
pub fn optional<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

/// The child of kind `N` the grammar guarantees to exist.
pub fn required<N: AstNode>(parent: &SyntaxNode) -> Result<N, InvariantError> {
    optional(parent).ok_or_else(|| InvariantError::MissingChild {
        parent: parent.kind(),
        child: short_type_name::<N>(),
        range: parent.text_range(),
    })
}

/// All children of kind `N`, in source order.
pub fn many<N: AstNode>(parent: &SyntaxNode) -> AstChildren<N> {
    AstChildren {
        inner: parent.children(),
        _marker: PhantomData,
    }
}

/// Iterator over the typed children of one node.
#[derive(Debug, Clone)]
pub struct AstChildren<N> {
    inner: SyntaxNodeChildren,
    _marker: PhantomData<N>,
}

impl<N: AstNode> Iterator for AstChildren<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        self.inner.by_ref().find_map(N::cast)
    }
}

fn short_type_name<N>() -> &'static str {
    let full = std::any::type_name::<N>();
    full.rsplit("::").next().unwrap_or(full)
}

fn node_text(node: &SyntaxNode) -> SmolStr {
    SmolStr::new(node.text().to_string())
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

/// A node whose whole text is one lexical unit.
macro_rules! ast_leaf {
    ($name:ident, $kind:ident) => {
        ast_node!($name, $kind);

        impl $name {
            pub fn text(&self) -> SmolStr {
                node_text(&self.0)
            }
        }
    };
}

macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident($node:ident)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant($node)),+
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                $($node::can_cast(kind))||+
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                $(
                    if $node::can_cast(node.kind()) {
                        return $node::cast(node).map(Self::$variant);
                    }
                )+
                None
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $(Self::$variant(n) => n.syntax()),+
                }
            }
        }
    };
}

// ============================================================================
// Root and sections
// ============================================================================

ast_node!(Idl, IDL);

impl Idl {
    pub fn control_section(&self) -> Result<ControlSection, InvariantError> {
        required(&self.0)
    }

    pub fn metadata_section(&self) -> Result<MetadataSection, InvariantError> {
        required(&self.0)
    }

    pub fn shape_section(&self) -> Result<ShapeSection, InvariantError> {
        required(&self.0)
    }
}

ast_node!(ControlSection, CONTROL_SECTION);

impl ControlSection {
    pub fn statements(&self) -> AstChildren<ControlStatement> {
        many(&self.0)
    }
}

ast_node!(ControlStatement, CONTROL_STATEMENT);

impl ControlStatement {
    pub fn key(&self) -> Result<NodeObjectKey, InvariantError> {
        required(&self.0)
    }

    pub fn value(&self) -> Result<NodeValue, InvariantError> {
        required(&self.0)
    }
}

ast_node!(MetadataSection, METADATA_SECTION);

impl MetadataSection {
    pub fn statements(&self) -> AstChildren<MetadataStatement> {
        many(&self.0)
    }
}

ast_node!(MetadataStatement, METADATA_STATEMENT);

impl MetadataStatement {
    pub fn key(&self) -> Result<NodeObjectKey, InvariantError> {
        required(&self.0)
    }

    pub fn value(&self) -> Result<NodeValue, InvariantError> {
        required(&self.0)
    }
}

ast_node!(ShapeSection, SHAPE_SECTION);

impl ShapeSection {
    /// Absent for a document without a `namespace` statement.
    pub fn namespace_statement(&self) -> Option<NamespaceStatement> {
        optional(&self.0)
    }

    pub fn use_section(&self) -> Option<UseSection> {
        optional(&self.0)
    }

    pub fn statements(&self) -> Option<ShapeStatements> {
        optional(&self.0)
    }
}

ast_node!(NamespaceStatement, NAMESPACE_STATEMENT);

impl NamespaceStatement {
    pub fn namespace(&self) -> Result<Namespace, InvariantError> {
        required(&self.0)
    }
}

ast_node!(UseSection, USE_SECTION);

impl UseSection {
    pub fn statements(&self) -> AstChildren<UseStatement> {
        many(&self.0)
    }
}

ast_node!(UseStatement, USE_STATEMENT);

impl UseStatement {
    pub fn target(&self) -> Result<AbsoluteRootShapeId, InvariantError> {
        required(&self.0)
    }
}

ast_node!(ShapeStatements, SHAPE_STATEMENTS);

impl ShapeStatements {
    pub fn shapes(&self) -> AstChildren<ShapeStatement> {
        many(&self.0)
    }

    pub fn applies(&self) -> AstChildren<ApplyStatement> {
        many(&self.0)
    }
}

ast_node!(ApplyStatement, APPLY_STATEMENT);

impl ApplyStatement {
    pub fn target(&self) -> Result<ShapeId, InvariantError> {
        required(&self.0)
    }

    /// Traits applied either inline or through a block
    pub fn traits(&self) -> Result<Vec<TraitApplication>, InvariantError> {
        if let Some(single) = optional::<TraitApplication>(&self.0) {
            return Ok(vec![single]);
        }
        let block: ApplyBlock = required(&self.0)?;
        Ok(block.traits()?.traits().collect())
    }
}

ast_node!(ApplyBlock, APPLY_BLOCK);

impl ApplyBlock {
    pub fn traits(&self) -> Result<TraitStatements, InvariantError> {
        required(&self.0)
    }
}

// ============================================================================
// Shapes
// ============================================================================

ast_node!(ShapeStatement, SHAPE_STATEMENT);

impl ShapeStatement {
    pub fn traits(&self) -> Result<TraitStatements, InvariantError> {
        required(&self.0)
    }

    pub fn shape(&self) -> Result<ShapeDecl, InvariantError> {
        required(&self.0)
    }
}

ast_enum!(
    /// Any shape declaration
    ShapeDecl {
        Simple(SimpleShape),
        Enum(EnumShape),
        Aggregate(AggregateShape),
        Entity(EntityShape),
        Operation(OperationShape),
    }
);

impl ShapeDecl {
    pub fn name(&self) -> Result<Identifier, InvariantError> {
        required(self.syntax())
    }

    pub fn mixins(&self) -> Option<Mixins> {
        optional(self.syntax())
    }
}

ast_node!(Mixins, MIXINS);

impl Mixins {
    pub fn targets(&self) -> AstChildren<ShapeId> {
        many(&self.0)
    }
}

ast_node!(ForResource, FOR_RESOURCE);

impl ForResource {
    pub fn target(&self) -> Result<ShapeId, InvariantError> {
        required(&self.0)
    }
}

ast_node!(SimpleShape, SIMPLE_SHAPE);

impl SimpleShape {
    pub fn type_name(&self) -> Result<SimpleTypeName, InvariantError> {
        required(&self.0)
    }

    pub fn name(&self) -> Result<Identifier, InvariantError> {
        required(&self.0)
    }
}

ast_leaf!(SimpleTypeName, SIMPLE_TYPE_NAME);

ast_node!(EnumShape, ENUM_SHAPE);

impl EnumShape {
    pub fn type_name(&self) -> Result<EnumTypeName, InvariantError> {
        required(&self.0)
    }

    pub fn name(&self) -> Result<Identifier, InvariantError> {
        required(&self.0)
    }

    pub fn members(&self) -> Result<EnumShapeMembers, InvariantError> {
        required(&self.0)
    }
}

ast_leaf!(EnumTypeName, ENUM_TYPE_NAME);

ast_node!(EnumShapeMembers, ENUM_SHAPE_MEMBERS);

impl EnumShapeMembers {
    pub fn members(&self) -> AstChildren<EnumShapeMember> {
        many(&self.0)
    }
}

ast_node!(EnumShapeMember, ENUM_SHAPE_MEMBER);

impl EnumShapeMember {
    pub fn traits(&self) -> Result<TraitStatements, InvariantError> {
        required(&self.0)
    }

    pub fn name(&self) -> Result<Identifier, InvariantError> {
        required(&self.0)
    }

    pub fn value(&self) -> Option<ValueAssignment> {
        optional(&self.0)
    }
}

ast_node!(ValueAssignment, VALUE_ASSIGNMENT);

impl ValueAssignment {
    pub fn value(&self) -> Result<NodeValue, InvariantError> {
        required(&self.0)
    }
}

ast_node!(AggregateShape, AGGREGATE_SHAPE);

impl AggregateShape {
    pub fn type_name(&self) -> Result<AggregateTypeName, InvariantError> {
        required(&self.0)
    }

    pub fn name(&self) -> Result<Identifier, InvariantError> {
        required(&self.0)
    }

    pub fn for_resource(&self) -> Option<ForResource> {
        optional(&self.0)
    }

    pub fn mixins(&self) -> Option<Mixins> {
        optional(&self.0)
    }

    pub fn members(&self) -> Result<ShapeMembers, InvariantError> {
        required(&self.0)
    }
}

ast_leaf!(AggregateTypeName, AGGREGATE_TYPE_NAME);

ast_node!(ShapeMembers, SHAPE_MEMBERS);

impl ShapeMembers {
    pub fn members(&self) -> AstChildren<ShapeMember> {
        many(&self.0)
    }
}

ast_node!(ShapeMember, SHAPE_MEMBER);

impl ShapeMember {
    pub fn traits(&self) -> Result<TraitStatements, InvariantError> {
        required(&self.0)
    }

    pub fn decl(&self) -> Result<MemberDecl, InvariantError> {
        required(&self.0)
    }

    pub fn value(&self) -> Option<ValueAssignment> {
        optional(&self.0)
    }
}

ast_enum!(
    /// `name: Target` or `$name`
    MemberDecl {
        Explicit(ExplicitShapeMember),
        Elided(ElidedShapeMember),
    }
);

impl MemberDecl {
    pub fn name(&self) -> Result<Identifier, InvariantError> {
        required(self.syntax())
    }
}

ast_node!(ExplicitShapeMember, EXPLICIT_SHAPE_MEMBER);

impl ExplicitShapeMember {
    pub fn name(&self) -> Result<Identifier, InvariantError> {
        required(&self.0)
    }

    pub fn target(&self) -> Result<ShapeId, InvariantError> {
        required(&self.0)
    }
}

ast_node!(ElidedShapeMember, ELIDED_SHAPE_MEMBER);

impl ElidedShapeMember {
    pub fn name(&self) -> Result<Identifier, InvariantError> {
        required(&self.0)
    }
}

ast_node!(EntityShape, ENTITY_SHAPE);

impl EntityShape {
    pub fn type_name(&self) -> Result<EntityTypeName, InvariantError> {
        required(&self.0)
    }

    pub fn name(&self) -> Result<Identifier, InvariantError> {
        required(&self.0)
    }

    pub fn body(&self) -> Result<NodeObject, InvariantError> {
        required(&self.0)
    }
}

ast_leaf!(EntityTypeName, ENTITY_TYPE_NAME);

ast_node!(OperationShape, OPERATION_SHAPE);

impl OperationShape {
    pub fn name(&self) -> Result<Identifier, InvariantError> {
        required(&self.0)
    }

    pub fn body(&self) -> Result<OperationBody, InvariantError> {
        required(&self.0)
    }
}

ast_node!(OperationBody, OPERATION_BODY);

impl OperationBody {
    pub fn input(&self) -> Option<OperationInput> {
        optional(&self.0)
    }

    pub fn output(&self) -> Option<OperationOutput> {
        optional(&self.0)
    }

    pub fn errors(&self) -> Option<OperationErrors> {
        optional(&self.0)
    }
}

ast_node!(OperationInput, OPERATION_INPUT);

impl OperationInput {
    pub fn traits(&self) -> Result<TraitStatements, InvariantError> {
        required(&self.0)
    }

    pub fn target(&self) -> Result<OperationTarget, InvariantError> {
        required(&self.0)
    }
}

ast_node!(OperationOutput, OPERATION_OUTPUT);

impl OperationOutput {
    pub fn traits(&self) -> Result<TraitStatements, InvariantError> {
        required(&self.0)
    }

    pub fn target(&self) -> Result<OperationTarget, InvariantError> {
        required(&self.0)
    }
}

ast_enum!(
    /// `:= { .. }` or `: ShapeId`
    OperationTarget {
        Inline(InlineAggregateShape),
        Named(ShapeId),
    }
);

ast_node!(InlineAggregateShape, INLINE_AGGREGATE_SHAPE);

impl InlineAggregateShape {
    pub fn traits(&self) -> Result<TraitStatements, InvariantError> {
        required(&self.0)
    }

    pub fn members(&self) -> Result<ShapeMembers, InvariantError> {
        required(&self.0)
    }
}

ast_node!(OperationErrors, OPERATION_ERRORS);

impl OperationErrors {
    pub fn errors(&self) -> AstChildren<ShapeId> {
        many(&self.0)
    }
}

// ============================================================================
// Traits
// ============================================================================

ast_node!(TraitStatements, TRAIT_STATEMENTS);

impl TraitStatements {
    pub fn traits(&self) -> AstChildren<TraitApplication> {
        many(&self.0)
    }
}

ast_node!(TraitApplication, TRAIT_APPLICATION);

impl TraitApplication {
    pub fn name(&self) -> Result<TraitName, InvariantError> {
        required(&self.0)
    }

    /// The trait's shape id as written, without the `@`
    pub fn id(&self) -> Result<SmolStr, InvariantError> {
        Ok(self.name()?.shape_id()?.text())
    }

    pub fn body(&self) -> Option<TraitBody> {
        optional(&self.0)
    }
}

ast_node!(TraitName, TRAIT_NAME);

impl TraitName {
    pub fn shape_id(&self) -> Result<ShapeId, InvariantError> {
        required(&self.0)
    }
}

ast_node!(TraitBody, TRAIT_BODY);

impl TraitBody {
    pub fn structure(&self) -> Option<TraitStructure> {
        optional(&self.0)
    }

    pub fn value(&self) -> Option<NodeValue> {
        optional(&self.0)
    }
}

ast_node!(TraitStructure, TRAIT_STRUCTURE);

impl TraitStructure {
    pub fn entries(&self) -> AstChildren<NodeObjectKvp> {
        many(&self.0)
    }
}

// ============================================================================
// Node values
// ============================================================================

ast_node!(NodeValue, NODE_VALUE);

impl NodeValue {
    pub fn kind(&self) -> Result<NodeValueKind, InvariantError> {
        required(&self.0)
    }
}

ast_enum!(
    NodeValueKind {
        Array(NodeArray),
        Object(NodeObject),
        Number(Number),
        Keyword(NodeKeyword),
        String(NodeStringValue),
    }
);

ast_node!(NodeArray, NODE_ARRAY);

impl NodeArray {
    pub fn values(&self) -> AstChildren<NodeValue> {
        many(&self.0)
    }
}

ast_node!(NodeObject, NODE_OBJECT);

impl NodeObject {
    pub fn entries(&self) -> AstChildren<NodeObjectKvp> {
        many(&self.0)
    }

    /// Value of the last entry named `key`
    pub fn get(&self, key: &str) -> Result<Option<NodeValue>, InvariantError> {
        let mut found = None;
        for entry in self.entries() {
            if entry.key()?.name()? == key {
                found = Some(entry.value()?);
            }
        }
        Ok(found)
    }
}

ast_node!(NodeObjectKvp, NODE_OBJECT_KVP);

impl NodeObjectKvp {
    pub fn key(&self) -> Result<NodeObjectKey, InvariantError> {
        required(&self.0)
    }

    pub fn value(&self) -> Result<NodeValue, InvariantError> {
        required(&self.0)
    }
}

ast_node!(NodeObjectKey, NODE_OBJECT_KEY);

impl NodeObjectKey {
    /// Key text, with quoted keys unescaped
    pub fn name(&self) -> Result<SmolStr, InvariantError> {
        if let Some(quoted) = optional::<QuotedText>(&self.0) {
            return quoted.value().map(SmolStr::from);
        }
        Ok(required::<Identifier>(&self.0)?.text())
    }
}

ast_leaf!(Number, NUMBER);
ast_leaf!(NodeKeyword, NODE_KEYWORD);

ast_node!(NodeStringValue, NODE_STRING_VALUE);

impl NodeStringValue {
    pub fn kind(&self) -> Result<StringValueKind, InvariantError> {
        required(&self.0)
    }
}

ast_enum!(
    StringValueKind {
        TextBlock(TextBlock),
        Quoted(QuotedText),
        ShapeId(ShapeId),
    }
);

ast_leaf!(TextBlock, TEXT_BLOCK);

impl TextBlock {
    /// Block contents without delimiters or the newline after the opening one
    pub fn value(&self) -> Result<String, InvariantError> {
        let text = self.text();
        let inner = text
            .strip_prefix("\"\"\"")
            .and_then(|rest| rest.strip_suffix("\"\"\""))
            .ok_or_else(|| self.malformed(&text))?;
        let inner = inner
            .strip_prefix("\r\n")
            .or_else(|| inner.strip_prefix('\n'))
            .unwrap_or(inner);
        Ok(unescape(inner))
    }

    fn malformed(&self, text: &str) -> InvariantError {
        InvariantError::MalformedLiteral {
            kind: SyntaxKind::TEXT_BLOCK,
            text: text.to_string(),
            range: self.text_range(),
        }
    }
}

ast_leaf!(QuotedText, QUOTED_TEXT);

impl QuotedText {
    /// Contents between the quotes, escapes resolved
    pub fn value(&self) -> Result<String, InvariantError> {
        self.raw().map(|raw| unescape(&raw))
    }

    /// Contents between the quotes, escapes kept as written
    pub fn raw(&self) -> Result<String, InvariantError> {
        let text = self.text();
        text.strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .map(str::to_string)
            .ok_or_else(|| InvariantError::MalformedLiteral {
                kind: SyntaxKind::QUOTED_TEXT,
                text: text.to_string(),
                range: self.text_range(),
            })
    }
}

// ============================================================================
// Names
// ============================================================================

ast_leaf!(Identifier, IDENTIFIER);
ast_leaf!(Namespace, NAMESPACE);
ast_leaf!(AbsoluteRootShapeId, ABSOLUTE_ROOT_SHAPE_ID);
ast_leaf!(ShapeId, SHAPE_ID);

/// Resolve JSON-style escapes; unknown escapes are kept verbatim.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            // Escaped newline continues the line
            Some('\n') => {}
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
