//! Syntax kinds for the Rowan-based CST
//!
//! One kind per grammar rule. Trivia kinds are known to the tree builder but
//! never materialized as nodes; `TEXT` is the opaque token kind that carries
//! the source text covered by a node.

use super::grammar::Rule;

/// All syntax kinds (rule nodes and the covering text token) of a Smithy IDL document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (matched by the grammar, dropped by the tree builder)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,
    KEYWORD,
    IDENT_START,
    IDENT_CHARS,
    EOI,
    /// Any rule the grammar never reports as a token pair
    FRAGMENT,

    // =========================================================================
    // TOKENS
    // =========================================================================
    /// Source text covered by the innermost open node
    TEXT,

    // =========================================================================
    // SECTIONS
    // =========================================================================
    IDL,
    CONTROL_SECTION,
    CONTROL_STATEMENT,
    METADATA_SECTION,
    METADATA_STATEMENT,
    SHAPE_SECTION,
    NAMESPACE_STATEMENT,
    USE_SECTION,
    USE_STATEMENT,
    SHAPE_STATEMENTS,
    APPLY_STATEMENT,
    APPLY_BLOCK,
    SHAPE_STATEMENT,

    // =========================================================================
    // SHAPES
    // =========================================================================
    MIXINS,
    FOR_RESOURCE,
    SIMPLE_SHAPE,
    SIMPLE_TYPE_NAME,
    ENUM_SHAPE,
    ENUM_TYPE_NAME,
    ENUM_SHAPE_MEMBERS,
    ENUM_SHAPE_MEMBER,
    VALUE_ASSIGNMENT,
    AGGREGATE_SHAPE,
    AGGREGATE_TYPE_NAME,
    SHAPE_MEMBERS,
    SHAPE_MEMBER,
    EXPLICIT_SHAPE_MEMBER,
    ELIDED_SHAPE_MEMBER,
    ENTITY_SHAPE,
    ENTITY_TYPE_NAME,
    OPERATION_SHAPE,
    OPERATION_BODY,
    OPERATION_INPUT,
    OPERATION_OUTPUT,
    INLINE_AGGREGATE_SHAPE,
    OPERATION_ERRORS,

    // =========================================================================
    // TRAITS
    // =========================================================================
    TRAIT_STATEMENTS,
    TRAIT_APPLICATION,
    TRAIT_NAME,
    TRAIT_BODY,
    TRAIT_STRUCTURE,

    // =========================================================================
    // NODE VALUES
    // =========================================================================
    NODE_VALUE,
    NODE_ARRAY,
    NODE_OBJECT,
    NODE_OBJECT_KVP,
    NODE_OBJECT_KEY,
    NUMBER,
    NODE_KEYWORD,
    NODE_STRING_VALUE,
    TEXT_BLOCK,
    QUOTED_TEXT,

    // =========================================================================
    // NAMES
    // =========================================================================
    IDENTIFIER,
    NAMESPACE,
    ABSOLUTE_ROOT_SHAPE_ID,
    SHAPE_ID,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this kind is trivia (never materialized in the tree)
    pub fn is_trivia(self) -> bool {
        (self as u16) <= (Self::FRAGMENT as u16)
    }
}

impl From<Rule> for SyntaxKind {
    #[allow(unreachable_patterns)]
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::WHITESPACE => Self::WHITESPACE,
            Rule::COMMENT => Self::COMMENT,
            Rule::EOI => Self::EOI,
            Rule::identifier_start => Self::IDENT_START,
            Rule::identifier_chars => Self::IDENT_CHARS,
            Rule::kw_namespace
            | Rule::kw_use
            | Rule::kw_metadata
            | Rule::kw_apply
            | Rule::kw_with
            | Rule::kw_for
            | Rule::kw_operation => Self::KEYWORD,

            Rule::idl => Self::IDL,
            Rule::control_section => Self::CONTROL_SECTION,
            Rule::control_statement => Self::CONTROL_STATEMENT,
            Rule::metadata_section => Self::METADATA_SECTION,
            Rule::metadata_statement => Self::METADATA_STATEMENT,
            Rule::shape_section => Self::SHAPE_SECTION,
            Rule::namespace_statement => Self::NAMESPACE_STATEMENT,
            Rule::use_section => Self::USE_SECTION,
            Rule::use_statement => Self::USE_STATEMENT,
            Rule::shape_statements => Self::SHAPE_STATEMENTS,
            Rule::apply_statement => Self::APPLY_STATEMENT,
            Rule::apply_block => Self::APPLY_BLOCK,
            Rule::shape_statement => Self::SHAPE_STATEMENT,

            Rule::mixins => Self::MIXINS,
            Rule::for_resource => Self::FOR_RESOURCE,
            Rule::simple_shape => Self::SIMPLE_SHAPE,
            Rule::simple_type_name => Self::SIMPLE_TYPE_NAME,
            Rule::enum_shape => Self::ENUM_SHAPE,
            Rule::enum_type_name => Self::ENUM_TYPE_NAME,
            Rule::enum_shape_members => Self::ENUM_SHAPE_MEMBERS,
            Rule::enum_shape_member => Self::ENUM_SHAPE_MEMBER,
            Rule::value_assignment => Self::VALUE_ASSIGNMENT,
            Rule::aggregate_shape => Self::AGGREGATE_SHAPE,
            Rule::aggregate_type_name => Self::AGGREGATE_TYPE_NAME,
            Rule::shape_members => Self::SHAPE_MEMBERS,
            Rule::shape_member => Self::SHAPE_MEMBER,
            Rule::explicit_shape_member => Self::EXPLICIT_SHAPE_MEMBER,
            Rule::elided_shape_member => Self::ELIDED_SHAPE_MEMBER,
            Rule::entity_shape => Self::ENTITY_SHAPE,
            Rule::entity_type_name => Self::ENTITY_TYPE_NAME,
            Rule::operation_shape => Self::OPERATION_SHAPE,
            Rule::operation_body => Self::OPERATION_BODY,
            Rule::operation_input => Self::OPERATION_INPUT,
            Rule::operation_output => Self::OPERATION_OUTPUT,
            Rule::inline_aggregate_shape => Self::INLINE_AGGREGATE_SHAPE,
            Rule::operation_errors => Self::OPERATION_ERRORS,

            Rule::trait_statements => Self::TRAIT_STATEMENTS,
            Rule::trait_application => Self::TRAIT_APPLICATION,
            Rule::trait_name => Self::TRAIT_NAME,
            Rule::trait_body => Self::TRAIT_BODY,
            Rule::trait_structure => Self::TRAIT_STRUCTURE,

            Rule::node_value => Self::NODE_VALUE,
            Rule::node_array => Self::NODE_ARRAY,
            Rule::node_object => Self::NODE_OBJECT,
            Rule::node_object_kvp => Self::NODE_OBJECT_KVP,
            Rule::node_object_key => Self::NODE_OBJECT_KEY,
            Rule::number => Self::NUMBER,
            Rule::node_keyword => Self::NODE_KEYWORD,
            Rule::node_string_value => Self::NODE_STRING_VALUE,
            Rule::text_block => Self::TEXT_BLOCK,
            Rule::quoted_text => Self::QUOTED_TEXT,

            Rule::identifier => Self::IDENTIFIER,
            Rule::namespace => Self::NAMESPACE,
            Rule::absolute_root_shape_id => Self::ABSOLUTE_ROOT_SHAPE_ID,
            Rule::shape_id => Self::SHAPE_ID,

            _ => Self::FRAGMENT,
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SmithyLanguage {}

impl rowan::Language for SmithyLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<SmithyLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<SmithyLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<SmithyLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<SmithyLanguage>;
