//! Field readers for untrusted JSON. Every reader returns `None` instead of failing.

use serde_json::Value;

/// Non-negative integer field
pub fn usize_field(value: &Value, key: &str) -> Option<usize> {
    value
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
}

/// Signed integer field (floats are rejected)
pub fn int_field(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(Value::as_i64)
}

/// Finite numeric field; integers are accepted as floats
pub fn f32_field(value: &Value, key: &str) -> Option<f32> {
    value
        .get(key)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .filter(|v| v.is_finite())
}
