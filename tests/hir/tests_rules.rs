//! Trait → validation rule translation.

use rstest::rstest;
use smithy_ir::hir::{DiagnosticCode, Number, Severity, ValidationRule};

use crate::helpers::diagnostic_helpers::with_code;
use crate::helpers::source_fixtures::{document, resolve_source};

fn rules_for(traits: &str) -> (Vec<ValidationRule>, usize) {
    let resolution = resolve_source(&document(&format!("structure S {{\n{traits}\na: String\n}}")));
    let member = resolution.model.type_named("S").unwrap().property("a").unwrap();
    let unknown = with_code(&resolution.diagnostics, DiagnosticCode::UnknownTrait).len();
    (member.rules.clone(), unknown)
}

#[rstest]
#[case("@required", vec![ValidationRule::Required])]
#[case("@length(min: 2)", vec![ValidationRule::StringMinLength(2)])]
#[case("@length(max: 9)", vec![ValidationRule::StringMaxLength(9)])]
#[case(
    "@length(min: 2, max: 9)",
    vec![ValidationRule::StringMinLength(2), ValidationRule::StringMaxLength(9)]
)]
#[case("@pattern(\"^\\\\d+$\")", vec![ValidationRule::StringPattern("^\\\\d+$".into())])]
#[case("@pattern(\"a\\\"b\")", vec![ValidationRule::StringPattern("a\\\"b".into())])]
#[case(
    "@pattern(\"\"\"\n^x$\"\"\")",
    vec![ValidationRule::StringPattern("^x$".into())]
)]
#[case(
    "@range(min: 0, max: 10)",
    vec![
        ValidationRule::NumberGte(Number::Integer(0)),
        ValidationRule::NumberLte(Number::Integer(10)),
    ]
)]
#[case("@range(max: -1)", vec![ValidationRule::NumberLte(Number::Integer(-1))])]
#[case("@uniqueItems", vec![ValidationRule::ArrayUniqueItems])]
#[case("@smithy.api#required", vec![ValidationRule::Required])]
fn test_trait_translation(#[case] traits: &str, #[case] expected: Vec<ValidationRule>) {
    let (rules, unknown) = rules_for(traits);
    assert_eq!(rules, expected);
    assert_eq!(unknown, 0);
}

#[rstest]
#[case("@documentation(\"text\")")]
#[case("@sensitive")]
#[case("@httpLabel")]
fn test_unknown_trait_is_informational(#[case] traits: &str) {
    let (rules, unknown) = rules_for(traits);
    assert!(rules.is_empty());
    assert_eq!(unknown, 1);
}

#[test]
fn test_unknown_trait_does_not_stop_translation() {
    let (rules, unknown) = rules_for("@documentation(\"text\")\n@required");
    assert_eq!(rules, vec![ValidationRule::Required]);
    assert_eq!(unknown, 1);

    let resolution = resolve_source(&document("structure S {\n@jsonName(\"x\")\na: String\n}"));
    let diagnostic = &with_code(&resolution.diagnostics, DiagnosticCode::UnknownTrait)[0];
    assert_eq!(diagnostic.severity, Severity::Info);
    assert!(diagnostic.message.contains("jsonName"));
}
