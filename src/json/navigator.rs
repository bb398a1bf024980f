//! Path-based lookups over `serde_json::Value`

use serde_json::{Map, Value};

/// One step of a lookup path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Object member
    Key(&'a str),
    /// Array element
    Index(usize),
}

/// Descend into `value` along `path`
///
/// Returns `None` as soon as a step is absent or the node has the wrong type.
pub fn lookup<'v>(value: &'v Value, path: &[Step<'_>]) -> Option<&'v Value> {
    path.iter().try_fold(value, |current, step| match (step, current) {
        (Step::Key(key), Value::Object(map)) => map.get(*key),
        (Step::Index(index), Value::Array(items)) => items.get(*index),
        _ => None,
    })
}

/// Lookup a string at `path`
pub fn lookup_str<'v>(value: &'v Value, path: &[Step<'_>]) -> Option<&'v str> {
    lookup(value, path).and_then(Value::as_str)
}

/// Lookup an array at `path`
pub fn lookup_array<'v>(value: &'v Value, path: &[Step<'_>]) -> Option<&'v Vec<Value>> {
    lookup(value, path).and_then(Value::as_array)
}

/// Lookup an object at `path`
pub fn lookup_object<'v>(value: &'v Value, path: &[Step<'_>]) -> Option<&'v Map<String, Value>> {
    lookup(value, path).and_then(Value::as_object)
}

/// Lookup a scalar at `path`, rendered as a string
pub fn lookup_scalar(value: &Value, path: &[Step<'_>]) -> Option<String> {
    lookup(value, path).and_then(scalar_to_string)
}

/// Render a scalar JSON value as a string
///
/// Null renders as the empty string. Arrays and objects are not scalars.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Lookup by a dotted path such as `"query.redirects.0.to"`
///
/// A segment is an object key when the current node is an object and an
/// index when it is an array, so numeric page ids still work as keys. An
/// optional `$.` prefix is ignored.
pub fn dotted<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    path.split('.').try_fold(value, |current, part| match current {
        Value::Object(map) => map.get(part),
        Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
