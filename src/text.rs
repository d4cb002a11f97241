use itertools::Itertools;
use serde_json::Value;

/// Collapse every whitespace run into a single space and trim both ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Absent text normalizes to the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Text form of a loosely typed JSON field. Scalars keep their literal
/// form; null, arrays and objects become empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

// ── Tests ──
