//! Trait → validation rule translation.

use super::diagnostics::{DiagnosticCode, DiagnosticCollector};
use super::values::{Number, TraitApplicationValue, TraitBody, Value};

/// A validation constraint derived from a trait.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(
    feature = "interchange",
    serde(tag = "rule", content = "value", rename_all = "camelCase")
)]
pub enum ValidationRule {
    Required,
    StringMinLength(u64),
    StringMaxLength(u64),
    StringPattern(String),
    NumberGte(Number),
    NumberLte(Number),
    ArrayUniqueItems,
}

/// Translate an accumulated trait list into rules.
///
/// The result is a set in first-seen order. Traits with no rule mapping get
/// one `unknown-trait` info each.
pub fn translate(
    traits: &[TraitApplicationValue],
    diagnostics: &mut DiagnosticCollector<'_>,
) -> Vec<ValidationRule> {
    let mut rules = Vec::new();
    for application in traits {
        match application.id.as_str() {
            "required" => rules.push(ValidationRule::Required),
            "length" => {
                let body = application.body.as_ref();
                if let Some(min) = body.and_then(|b| bound(b, "min")).and_then(non_negative) {
                    rules.push(ValidationRule::StringMinLength(min));
                }
                if let Some(max) = body.and_then(|b| bound(b, "max")).and_then(non_negative) {
                    rules.push(ValidationRule::StringMaxLength(max));
                }
            }
            "pattern" => {
                // Quoted patterns are kept as written; a text block has no quotes to strip.
                let pattern = match (&application.verbatim, body_value(application)) {
                    (Some(raw), _) => Some(raw.clone()),
                    (None, Some(Value::String(block))) => Some(block.clone()),
                    _ => None,
                };
                if let Some(pattern) = pattern {
                    rules.push(ValidationRule::StringPattern(pattern));
                }
            }
            "range" => {
                let body = application.body.as_ref();
                if let Some(min) = body.and_then(|b| bound(b, "min")) {
                    rules.push(ValidationRule::NumberGte(min));
                }
                if let Some(max) = body.and_then(|b| bound(b, "max")) {
                    rules.push(ValidationRule::NumberLte(max));
                }
            }
            "uniqueItems" => rules.push(ValidationRule::ArrayUniqueItems),
            other => {
                tracing::trace!(trait_id = other, "trait has no rule mapping");
                diagnostics.report(
                    DiagnosticCode::UnknownTrait,
                    application.range,
                    format!("trait `{other}` is not translated into a validation rule"),
                );
            }
        }
    }
    dedup(rules)
}

fn body_value(application: &TraitApplicationValue) -> Option<&Value> {
    match application.body.as_ref()? {
        TraitBody::Value(value) => Some(value),
        TraitBody::Structure(_) => None,
    }
}

/// Integer `min`/`max` field of a `length` or `range` body.
fn bound(body: &TraitBody, key: &str) -> Option<Number> {
    match body.field(key)?.as_number()? {
        Number::Integer(n) => Some(Number::Integer(n)),
        Number::Float(_) => None,
    }
}

fn non_negative(number: Number) -> Option<u64> {
    number.as_i64().and_then(|n| u64::try_from(n).ok())
}

fn dedup(rules: Vec<ValidationRule>) -> Vec<ValidationRule> {
    let mut unique: Vec<ValidationRule> = Vec::with_capacity(rules.len());
    for rule in rules {
        if !unique.contains(&rule) {
            unique.push(rule);
        }
    }
    unique
}
