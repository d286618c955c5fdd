//! Services, operations and HTTP bindings.

use rstest::rstest;
use smithy_ir::hir::{DiagnosticCode, HttpVerb, ResolveOptions, Severity};
use smithy_ir::resolve_with_options;

use crate::helpers::diagnostic_helpers::{assert_no_errors, count, with_code};
use crate::helpers::source_fixtures::{document, resolve_source};

#[rstest]
#[case("TaskService", "Task")]
#[case("Widgets", "Widgets")]
#[case("Taskservice", "Task")]
#[case("Service", "")]
fn test_interface_name_strips_service_suffix(#[case] service: &str, #[case] expected: &str) {
    let resolution = resolve_source(&document(&format!("service {service} {{}}")));
    assert_eq!(resolution.model.interfaces.len(), 1);
    assert_eq!(resolution.model.interfaces[0].name, expected);
}

#[test]
fn test_one_interface_per_service() {
    let resolution = resolve_source(&document("service AService {}\nservice BService {}\nresource R {}"));
    let names: Vec<_> = resolution
        .model
        .interfaces
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_undefined_operation_is_excluded_and_reported() {
    let source = document("service S {\n    operations: [Known, Unknown]\n}\noperation Known {}");
    let resolution = resolve_source(&source);
    let interface = &resolution.model.interfaces[0];
    assert_eq!(interface.methods.len(), 1);
    assert_eq!(interface.methods[0].name, "Known");

    let reported = with_code(&resolution.diagnostics, DiagnosticCode::OperationNotDefined);
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].severity, Severity::Error);
    let range = reported[0].range;
    assert_eq!(
        &source[range.start_offset as usize..range.end_offset as usize],
        "Unknown"
    );
    assert_eq!(range.start_line, 4);
}

#[test]
fn test_operations_resolve_in_any_declaration_order() {
    let resolution = resolve_source(&document(
        "operation Early {}\nservice S { operations: [Early, Late] }\noperation Late {}",
    ));
    let methods: Vec<_> = resolution.model.interfaces[0]
        .methods
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(methods, vec!["Early", "Late"]);
    assert_no_errors(&resolution.diagnostics);
}

#[test]
fn test_http_paths_group_by_uri() {
    let source = document(
        r#"
        service S { operations: [List, Create, Get] }

        @http(method: "GET", uri: "/items")
        operation List {}

        @http(method: "POST", uri: "/items", code: 201)
        operation Create {}

        @http(method: "GET", uri: "/items/{id}")
        operation Get {}
        "#,
    );
    let resolution = resolve_source(&source);
    let interface = &resolution.model.interfaces[0];

    assert_eq!(interface.http_paths.len(), 2);
    let items = interface.http_path("/items").unwrap();
    assert_eq!(items.methods.len(), 2);
    assert_eq!(items.methods[0].verb, HttpVerb::Get);
    assert_eq!(items.methods[0].success_code, 200);
    assert_eq!(items.methods[0].name, "List");
    assert_eq!(items.methods[1].verb, HttpVerb::Post);
    assert_eq!(items.methods[1].success_code, 201);
    assert_eq!(interface.http_path("/items/{id}").unwrap().methods[0].name, "Get");
}

#[test]
fn test_unsupported_verb_defaults_to_get() {
    let resolution = resolve_source(&document(
        "service S { operations: [Op] }\n@http(method: \"get\", uri: \"/x\")\noperation Op {}",
    ));
    let method = &resolution.model.interfaces[0].http_paths[0].methods[0];
    assert_eq!(method.verb, HttpVerb::Get);
    assert_eq!(count(&resolution.diagnostics, DiagnosticCode::UnsupportedHttpVerb), 1);
}

#[rstest]
#[case("@http(method: \"GET\")")]
#[case("@http(uri: \"/x\")")]
#[case("@http(method: GET, uri: \"/x\")")]
#[case("@http(method: \"GET\", uri: \"/x\", code: \"200\")")]
#[case("@http(\"GET /x\")")]
fn test_malformed_http_is_skipped_silently(#[case] http: &str) {
    let resolution = resolve_source(&document(&format!(
        "service S {{ operations: [Op] }}\n{http}\noperation Op {{}}"
    )));
    let interface = &resolution.model.interfaces[0];
    assert!(interface.http_paths.is_empty());
    assert_eq!(interface.methods.len(), 1);
    assert!(resolution.diagnostics.is_empty(), "{:?}", resolution.diagnostics);
}

#[test]
fn test_deprecated_operation() {
    let source = document(
        "service S { operations: [Old] }\n@deprecated(message: \"gone\", since: \"2.0\")\noperation Old {}",
    );
    let resolution = resolve_source(&source);
    let deprecated = resolution.model.interfaces[0].methods[0]
        .deprecated
        .clone()
        .unwrap();
    assert_eq!(deprecated.message.as_deref(), Some("gone"));
    assert_eq!(deprecated.since.as_deref(), Some("2.0"));
    assert_eq!(deprecated.range.start_line, 4);
}

#[test]
fn test_inline_input_and_output_are_unsupported() {
    let resolution = resolve_source(&document(
        "service S { operations: [Op] }\noperation Op {\n    input := { a: String }\n    output := { b: String }\n}",
    ));
    let method = &resolution.model.interfaces[0].methods[0];
    assert!(method.parameters.is_empty());
    assert!(method.return_type.is_none());

    let notices = with_code(&resolution.diagnostics, DiagnosticCode::UnsupportedFeature);
    assert_eq!(notices.len(), 2);
    assert!(notices.iter().all(|d| d.severity == Severity::Info));
    assert_eq!(count(&resolution.diagnostics, DiagnosticCode::UnknownReturnType), 0);
}

#[test]
fn test_return_type_merges_shape_and_reference_traits() {
    let resolution = resolve_source(&document(
        r#"
        service S { operations: [Op] }
        operation Op {
            @required
            output: Out
        }
        @length(max: 3)
        structure Out {}
        "#,
    ));
    let return_type = resolution.model.interfaces[0].methods[0]
        .return_type
        .clone()
        .unwrap();
    assert_eq!(return_type.type_name, "Out");
    assert_eq!(return_type.rules.len(), 2);
}

#[test]
fn test_title_and_major_version() {
    let resolution = resolve_source(&document(
        "@title(\"Shop API\")\nservice ShopService { version: \"v4.2\" }",
    ));
    assert_eq!(resolution.model.title, "Shop API");
    assert_eq!(resolution.model.major_version, 4);

    let untitled = resolve_source(&document("service ShopService {}"));
    assert_eq!(untitled.model.title, "Shop");
    assert_eq!(untitled.model.major_version, 1);

    let no_service = resolve_source(&document("structure S {}"));
    assert_eq!(no_service.model.title, "test.ns");
}

#[test]
fn test_options_change_defaults() {
    let options = ResolveOptions {
        default_success_code: 204,
        service_suffix: "Api".to_string(),
        default_major_version: 7,
    };
    let source = document(
        "service ShopApi { operations: [Op] }\n@http(method: \"PUT\", uri: \"/x\")\noperation Op {}",
    );
    let resolution = resolve_with_options(&source, "x.smithy", &options).unwrap();
    let interface = &resolution.model.interfaces[0];
    assert_eq!(interface.name, "Shop");
    assert_eq!(interface.http_paths[0].methods[0].success_code, 204);
    assert_eq!(resolution.model.major_version, 7);
}

#[test]
fn test_unions_are_never_emitted() {
    let resolution = resolve_source(&document("union U { a: String }\nstructure S { u: U }"));
    assert!(resolution.model.unions.is_empty());
    assert_eq!(resolution.model.types.len(), 1);
}

#[test]
fn test_enums_carry_values_and_deprecation() {
    let resolution = resolve_source(&document(
        "enum Color {\n    RED = \"red\"\n    @deprecated\n    BLUE\n}\nintEnum Level {\n    LOW = 1\n}",
    ));
    let color = resolution.model.enum_named("Color").unwrap();
    assert_eq!(color.kind, smithy_ir::hir::EnumKind::Enum);
    assert_eq!(color.values.len(), 2);
    assert_eq!(
        color.values[0].value,
        Some(smithy_ir::hir::EnumLiteral::String("red".into()))
    );
    assert!(color.values[0].deprecated.is_none());
    assert!(color.values[1].deprecated.is_some());
    assert_eq!(color.values[1].value, None);

    let level = resolution.model.enum_named("Level").unwrap();
    assert_eq!(level.kind, smithy_ir::hir::EnumKind::IntEnum);
    assert_eq!(
        level.values[0].value,
        Some(smithy_ir::hir::EnumLiteral::Integer(1))
    );
}
