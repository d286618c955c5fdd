//! Symbol index over real documents.

use smithy_ir::hir::{ShapeCategory, ShapeIndex};
use smithy_ir::parser::parse_idl;

use crate::helpers::source_fixtures::{document, fixture};

fn index(source: &str) -> ShapeIndex {
    let parse = parse_idl(source).unwrap();
    ShapeIndex::build(&parse.tree().unwrap().unwrap()).unwrap()
}

#[test]
fn test_every_category_is_routed() {
    let index = index(&document(
        r#"
        string S
        enum E { A }
        intEnum I { A = 1 }
        list L { member: String }
        map M { key: String, value: String }
        union U { a: String }
        structure T {}
        service Svc {}
        resource R {}
        operation Op {}
        "#,
    ));

    let expected = [
        (ShapeCategory::Simple, "S"),
        (ShapeCategory::Enum, "E"),
        (ShapeCategory::Enum, "I"),
        (ShapeCategory::List, "L"),
        (ShapeCategory::Map, "M"),
        (ShapeCategory::Union, "U"),
        (ShapeCategory::Structure, "T"),
        (ShapeCategory::Service, "Svc"),
        (ShapeCategory::Resource, "R"),
        (ShapeCategory::Operation, "Op"),
    ];
    for (category, name) in expected {
        let record = index
            .by_name(category, name)
            .unwrap_or_else(|| panic!("{name} missing from {category:?}"));
        assert_eq!(record.category, category);
    }
    assert_eq!(index.len(), expected.len());
    assert_eq!(index.namespace(), Some("test.ns"));
}

#[test]
fn test_absence_is_not_an_error() {
    let index = index(&document("structure T {}"));
    assert!(index.by_name(ShapeCategory::Operation, "T").is_none());
    assert!(index.by_name(ShapeCategory::Structure, "Nope").is_none());
    assert!(index.traits("Nope").is_empty());
}

#[test]
fn test_iteration_is_declaration_order_and_restartable() {
    let index = index(&fixture("tasks.smithy"));
    let first: Vec<_> = index
        .iter(ShapeCategory::Structure)
        .map(|r| r.name.to_string())
        .collect();
    let second: Vec<_> = index
        .iter(ShapeCategory::Structure)
        .map(|r| r.name.to_string())
        .collect();
    assert_eq!(
        first,
        vec!["CreateTaskInput", "ListTasksInput", "DeleteTaskInput", "Task", "TaskList"]
    );
    assert_eq!(first, second);
}

#[test]
fn test_traits_and_applies_are_recorded() {
    let index = index(&document("@sensitive\n@length(min: 1)\nstring Secret\napply Secret @documentation(\"x\")"));
    let ids: Vec<_> = index.traits("Secret").iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["sensitive", "length"]);
    assert_eq!(index.applies().len(), 1);
}
