//! Lookups over nested JSON documents that yield `None` on any missing segment

use serde_json::Value;

/// Follow object keys from `doc`; `None` if any segment is absent or not an object
pub fn lookup<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(doc, |node, key| node.as_object()?.get(*key))
}

/// Render a scalar as a string: strings as-is, numbers and booleans in JSON form
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn string_at(doc: &Value, path: &[&str]) -> Option<String> {
    lookup(doc, path).and_then(scalar_to_string)
}

pub fn string_or(doc: &Value, path: &[&str], default: &str) -> String {
    string_at(doc, path).unwrap_or_else(|| default.to_string())
}

pub fn bool_at(doc: &Value, path: &[&str]) -> Option<bool> {
    lookup(doc, path).and_then(Value::as_bool)
}

/// Integer at `path`, accepting numeric strings as well
pub fn int_at(doc: &Value, path: &[&str]) -> Option<i64> {
    match lookup(doc, path)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn array_at<'a>(doc: &'a Value, path: &[&str]) -> &'a [Value] {
    lookup(doc, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn first_at<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    array_at(doc, path).first()
}

/// Collect `field` from each object in the array at `path`
pub fn strings_from_objects(doc: &Value, path: &[&str], field: &str) -> Vec<String> {
    array_at(doc, path)
        .iter()
        .filter_map(|item| item.get(field).and_then(scalar_to_string))
        .collect()
}

pub fn strings_at(doc: &Value, path: &[&str]) -> Vec<String> {
    array_at(doc, path)
        .iter()
        .filter_map(scalar_to_string)
        .collect()
}

/// Python-style truthiness: null, false, 0, "", [] and {} are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
