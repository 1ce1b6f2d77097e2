//! Ordered fallback lookups over loosely shaped JSON records.
//!
//! A key "resolves" when it is present and not `null`. Values of the wrong
//! shape for the lookup (an object where text is expected, a non-numeric
//! string where a number is expected) do not resolve and the chain moves on.

use serde_json::Value;

/// Keys tried, in order, for a record id.
pub const ID_KEYS: &[&str] = &["_id", "id"];

fn present<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|value| !value.is_null())
}

/// Text of a scalar value; numbers and booleans are rendered.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn scalar_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// First key whose value renders as text.
#[must_use]
pub fn first_text(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| present(record, key))
        .find_map(scalar_text)
}

/// First key whose value is a number or a numeric string.
#[must_use]
pub fn first_number(record: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| present(record, key))
        .find_map(scalar_number)
}

/// Record id from `_id` / `id`.
///
/// Accepts strings, numbers and extended-JSON object ids (`{"$oid": "..."}`).
/// Blank strings do not resolve, so callers fall through to a synthesized id.
#[must_use]
pub fn record_id(record: &Value) -> Option<String> {
    first_id(record, ID_KEYS)
}

/// Like `record_id`, trying `keys` in the given order.
#[must_use]
pub fn first_id(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| present(record, key))
        .find_map(|value| {
            let id = match value {
                Value::Object(map) => map.get("$oid").and_then(scalar_text),
                other => scalar_text(other),
            };
            id.filter(|id| !id.trim().is_empty())
        })
}
