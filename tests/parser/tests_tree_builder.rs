//! Tree construction over real grammar events.

use smithy_ir::parser::{SyntaxKind, SyntaxNode, grammar, parse_idl};

fn root(source: &str) -> SyntaxNode {
    let parse = parse_idl(source).expect("event stream must be well formed");
    assert!(parse.ok(), "unexpected grammar errors: {:?}", parse.errors);
    parse.syntax().expect("accepted document has a tree")
}

#[test]
fn test_tree_covers_whole_document() {
    let source = "$version: \"2\"\n\nnamespace a.b\n\n// trailing comment\nstring Name\n";
    let root = root(source);
    assert_eq!(root.kind(), SyntaxKind::IDL);
    assert_eq!(root.text().to_string(), source);
    assert_eq!(u32::from(root.text_range().len()) as usize, source.len());
}

#[test]
fn test_trivia_kinds_never_appear() {
    let source = "$version: \"2\"\nnamespace a.b // ns\n/// doc\n@required\nstructure S { a: String, }\n";
    let root = root(source);
    for node in root.descendants() {
        assert!(!node.kind().is_trivia(), "trivia node {:?}", node.kind());
    }
}

#[test]
fn test_children_nest_within_parent_range() {
    let source = "$version: \"2\"\nnamespace a.b\nstructure S {\n    @length(min: 1)\n    a: String\n}\n";
    let root = root(source);
    for node in root.descendants() {
        for child in node.children() {
            assert!(
                node.text_range().contains_range(child.text_range()),
                "{:?} escapes {:?}",
                child.kind(),
                node.kind()
            );
        }
    }
}

#[test]
fn test_preorder_matches_enter_events() {
    let source = "$version: \"2\"\nnamespace a.b\nlist L { member: String }\n";
    let events = grammar::document_events(source).unwrap();
    let entered: Vec<SyntaxKind> = events
        .iter()
        .filter_map(|event| match event {
            smithy_ir::parser::Event::Enter { kind, .. } if !kind.is_trivia() => Some(*kind),
            _ => None,
        })
        .collect();
    let visited: Vec<SyntaxKind> = root(source).descendants().map(|n| n.kind()).collect();
    assert_eq!(entered, visited);
}

#[test]
fn test_rejected_document_has_no_tree() {
    let parse = parse_idl("namespace a.b\nstructure {").unwrap();
    assert!(!parse.ok());
    assert!(parse.syntax().is_none());
    assert_eq!(parse.tree().unwrap(), None);
    assert_eq!(parse.errors.len(), 1);
}

#[test]
fn test_deeply_nested_values_build() {
    let depth = 64;
    let value = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let source = format!("$version: \"2\"\nnamespace a.b\n@tags({value})\nstring S\n");
    let root = root(&source);
    let arrays = root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::NODE_ARRAY)
        .count();
    assert_eq!(arrays, depth);
}
