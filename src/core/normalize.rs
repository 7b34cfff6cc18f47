use serde_json::{Map, Value};
use crate::models::SkillSet;

/// Keys probed, in order, when an attribute entry is an object
const PROBE_KEYS: [&str; 9] = [
    "name", "title", "label", "value", "skill", "degree", "role", "company", "text",
];

/// Normalize an attribute value of any shape into a canonical token set
///
/// Accepted shapes:
/// - `null` → empty set
/// - array → each string element is lowercased and trimmed; each object
///   element yields its first non-empty probed key, or all its scalar values
///   joined by a space; other element types are dropped
/// - string → parsed as JSON when it encodes an array or object, otherwise
///   split on commas
/// - object → treated as a one-element array
///
/// Anything else yields the empty set. This never fails: the attribute data
/// comes from free-form JSON written by several different screens.
pub fn normalize(input: &Value) -> SkillSet {
    let mut tokens = SkillSet::new();
    collect(input, &mut tokens);
    tokens
}

/// Normalize a raw string attribute (JSON-encoded or comma-separated)
pub fn normalize_text(text: &str) -> SkillSet {
    let mut tokens = SkillSet::new();
    collect_text(text, &mut tokens);
    tokens
}

/// Lowercase and trim a single token, `None` when nothing is left
#[inline]
pub fn canonical(raw: &str) -> Option<String> {
    let token = raw.to_lowercase().trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn collect(input: &Value, tokens: &mut SkillSet) {
    match input {
        Value::Array(items) => {
            for token in items.iter().filter_map(element_token) {
                tokens.insert(token);
            }
        }
        Value::Object(map) => {
            if let Some(token) = object_token(map) {
                tokens.insert(token);
            }
        }
        Value::String(text) => collect_text(text, tokens),
        _ => {}
    }
}

fn collect_text(text: &str, tokens: &mut SkillSet) {
    match serde_json::from_str::<Value>(text) {
        Ok(parsed @ (Value::Array(_) | Value::Object(_))) => collect(&parsed, tokens),
        _ => {
            for token in text.split(',').filter_map(canonical) {
                tokens.insert(token);
            }
        }
    }
}

fn element_token(element: &Value) -> Option<String> {
    match element {
        Value::String(text) => canonical(text),
        Value::Object(map) => object_token(map),
        _ => None,
    }
}

fn object_token(map: &Map<String, Value>) -> Option<String> {
    PROBE_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .filter_map(scalar_text)
        .find_map(|text| canonical(&text))
        .or_else(|| {
            let joined = map
                .values()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(" ");
            canonical(&joined)
        })
}

/// Text of a scalar JSON value. Nulls, arrays and objects have none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
