//! Tolerant structural equivalence of JSON values
//!
//! Two job definitions are considered the same when they match field by
//! field, except that a missing field and a field holding an empty value
//! (`null`, `""`, `[]`, or an object whose members are all empty) are
//! interchangeable. The remote service routinely echoes empty defaults the
//! caller never wrote, so a plain `==` would report spurious drift.
//!
//! Every check walks the union of keys from both sides, which keeps the
//! relation symmetric.

use serde_json::{Map, Number, Value};

/// Whether a value counts as "not set"
///
/// An object is empty when every member is empty, so `{"devices": []}`
/// matches an absent field just like `{}` does.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.values().all(is_empty),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Compares two objects key by key over the union of their keys
pub fn maps_equivalent(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    let keys = a.keys().chain(b.keys().filter(|k| !a.contains_key(*k)));

    for key in keys {
        let matches = match (a.get(key), b.get(key)) {
            (Some(left), Some(right)) => values_equivalent(left, right),
            (Some(only), None) | (None, Some(only)) => is_empty(only),
            (None, None) => true,
        };
        if !matches {
            return false;
        }
    }

    true
}

/// Compares two values, recursing into objects and arrays
pub fn values_equivalent(a: &Value, b: &Value) -> bool {
    if is_empty(a) && is_empty(b) {
        return true;
    }

    match (a, b) {
        (Value::Object(left), Value::Object(right)) => maps_equivalent(left, right),
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right.iter())
                    .all(|(l, r)| values_equivalent(l, r))
        }
        (Value::Number(left), Value::Number(right)) => numbers_equivalent(left, right),
        _ => a == b,
    }
}

/// Integers compare exactly; floats (or an integer against a float) by value
fn numbers_equivalent(left: &Number, right: &Number) -> bool {
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
        return l == r;
    }
    if left.is_f64() || right.is_f64() {
        return match (left.as_f64(), right.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        };
    }
    // One side fits i64 only (negative), the other u64 only (above i64::MAX)
    false
}
