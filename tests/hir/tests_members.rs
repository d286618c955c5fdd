//! Member type resolution.

use rstest::rstest;
use smithy_ir::hir::{DiagnosticCode, Member, Resolution, Scalar, TypeName, ValidationRule};

use crate::helpers::diagnostic_helpers::{assert_no_errors, count};
use crate::helpers::source_fixtures::{document, resolve_source};

fn property(resolution: &Resolution, shape: &str, name: &str) -> Member {
    resolution
        .model
        .type_named(shape)
        .unwrap_or_else(|| panic!("type {shape} missing"))
        .property(name)
        .unwrap_or_else(|| panic!("property {name} missing"))
        .clone()
}

#[rstest]
#[case("String", Scalar::String)]
#[case("Integer", Scalar::Number)]
#[case("Byte", Scalar::Integer)]
#[case("BigDecimal", Scalar::Double)]
#[case("Timestamp", Scalar::DateTime)]
#[case("smithy.api#Blob", Scalar::Binary)]
fn test_wrapper_targets_are_primitive(#[case] target: &str, #[case] scalar: Scalar) {
    let resolution = resolve_source(&document(&format!("structure S {{ a: {target} }}")));
    let member = property(&resolution, "S", "a");
    assert!(member.is_primitive);
    assert!(!member.is_array);
    assert_eq!(member.type_name, Some(TypeName::Scalar(scalar)));
    assert_eq!(member.type_name.as_ref().and_then(TypeName::as_scalar), Some(scalar));
    assert_eq!(member.type_name.as_ref().and_then(TypeName::as_shape), None);
    assert_no_errors(&resolution.diagnostics);
}

#[test]
fn test_user_shapes_are_opaque_references() {
    let resolution = resolve_source(&document("structure S { other: T }\nstructure T {}\nunion U { a: String }\nstructure V { u: U, missing: Nowhere }"));
    let member = property(&resolution, "S", "other");
    assert!(!member.is_primitive);
    assert_eq!(member.type_name, Some(TypeName::Shape("T".into())));
    let type_name = member.type_name.as_ref().unwrap();
    assert_eq!(type_name.as_shape(), Some("T"));
    assert_eq!(type_name.as_scalar(), None);

    // Undeclared names are not an error unless they must be primitives.
    let missing = property(&resolution, "V", "missing");
    assert_eq!(missing.type_name, Some(TypeName::Shape("Nowhere".into())));
    assert_eq!(
        property(&resolution, "V", "u").type_name,
        Some(TypeName::Shape("U".into()))
    );
    assert_no_errors(&resolution.diagnostics);
}

#[test]
fn test_list_unwraps_one_level_with_trait_union() {
    let source = document(
        r#"
        structure S {
            @required
            tags: Tags
        }

        @uniqueItems
        list Tags {
            @length(max: 5)
            member: Tag
        }

        structure Tag {}
        "#,
    );
    let resolution = resolve_source(&source);
    let member = property(&resolution, "S", "tags");

    assert!(member.is_array);
    assert!(!member.is_primitive);
    assert_eq!(member.type_name, Some(TypeName::Shape("Tag".into())));
    assert_eq!(member.rules.len(), 3);
    for rule in [
        ValidationRule::ArrayUniqueItems,
        ValidationRule::StringMaxLength(5),
        ValidationRule::Required,
    ] {
        assert!(member.rules.contains(&rule), "missing {rule:?}");
    }
}

#[test]
fn test_list_of_primitives() {
    let resolution = resolve_source(&document("structure S { names: Names }\nlist Names { member: String }"));
    let member = property(&resolution, "S", "names");
    assert!(member.is_array);
    assert!(member.is_primitive);
    assert_eq!(member.type_name, Some(TypeName::Scalar(Scalar::String)));
}

#[test]
fn test_list_of_lists_is_not_unwrapped_twice() {
    let resolution = resolve_source(&document(
        "structure S { grid: Rows }\nlist Rows { member: Row }\nlist Row { member: Integer }",
    ));
    let member = property(&resolution, "S", "grid");
    assert!(member.is_array);
    assert_eq!(member.type_name, Some(TypeName::Shape("Row".into())));
}

#[test]
fn test_empty_list_reports_missing_member() {
    let resolution = resolve_source(&document("structure S { xs: Xs }\nlist Xs {}"));
    let member = property(&resolution, "S", "xs");
    assert!(member.is_array);
    assert_eq!(member.type_name, None);
    assert_eq!(count(&resolution.diagnostics, DiagnosticCode::MissingListMember), 1);
}

#[test]
fn test_simple_alias_unwraps_one_level() {
    let source = document(
        r#"
        structure S {
            email: Email
            alias: EmailAlias
        }

        @pattern("^.+@.+$")
        string Email

        structure EmailAlias {}
        "#,
    );
    let resolution = resolve_source(&source);
    let member = property(&resolution, "S", "email");
    assert!(member.is_primitive);
    assert_eq!(member.type_name, Some(TypeName::Scalar(Scalar::String)));
    assert_eq!(
        member.rules,
        vec![ValidationRule::StringPattern("^.+@.+$".into())]
    );
    assert_no_errors(&resolution.diagnostics);
}

#[rstest]
#[case("timestamp", Scalar::DateTime)]
#[case("bigInteger", Scalar::Long)]
#[case("byte", Scalar::Number)]
#[case("short", Scalar::Float)]
fn test_alias_keyword_table(#[case] keyword: &str, #[case] scalar: Scalar) {
    let resolution = resolve_source(&document(&format!("structure S {{ a: A }}\n{keyword} A")));
    assert_eq!(
        property(&resolution, "S", "a").type_name,
        Some(TypeName::Scalar(scalar))
    );
}

#[test]
fn test_document_alias_falls_back_to_string() {
    let resolution = resolve_source(&document("structure S { a: Doc }\ndocument Doc"));
    let member = property(&resolution, "S", "a");
    assert_eq!(member.type_name, Some(TypeName::Scalar(Scalar::String)));
    assert_eq!(count(&resolution.diagnostics, DiagnosticCode::UnsupportedSimpleType), 1);
}

#[rstest]
#[case("smithy.api#Document")]
#[case("PrimitiveInteger")]
#[case("smithy.api#Unknown")]
fn test_expected_primitive_without_mapping(#[case] target: &str) {
    let resolution = resolve_source(&document(&format!("structure S {{ a: {target} }}")));
    let member = property(&resolution, "S", "a");
    assert!(member.is_primitive);
    assert_eq!(member.type_name, Some(TypeName::Scalar(Scalar::String)));
    assert_eq!(count(&resolution.diagnostics, DiagnosticCode::UnknownPrimitive), 1);
}

#[test]
fn test_elided_member_resolves_through_mixin() {
    let source = document(
        r#"
        @mixin
        structure Named {
            @required
            name: String
        }

        structure Widget with [Named] {
            @length(min: 1)
            $name
        }
        "#,
    );
    let resolution = resolve_source(&source);
    let member = property(&resolution, "Widget", "name");
    assert_eq!(member.type_name, Some(TypeName::Scalar(Scalar::String)));
    assert_eq!(
        member.rules,
        vec![ValidationRule::Required, ValidationRule::StringMinLength(1)]
    );
    assert_eq!(count(&resolution.diagnostics, DiagnosticCode::UnexpectedElision), 0);
}

#[test]
fn test_unresolvable_elision_is_reported() {
    let resolution = resolve_source(&document("structure S {\n    $ghost\n}"));
    let member = property(&resolution, "S", "ghost");
    assert_eq!(member.type_name, None);
    assert!(!member.is_primitive);

    let elisions: Vec<_> = resolution
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::UnexpectedElision)
        .collect();
    assert_eq!(elisions.len(), 1);
    assert_eq!(elisions[0].range.start_line, 4);
}
