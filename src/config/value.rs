//! Value representation for configuration trees.
//!
//! Values are `serde_json::Value`s built with `preserve_order`, so mappings
//! keep insertion order.

pub use serde_json::Value;

/// An ordered mapping of configuration keys to values.
pub type Items = serde_json::Map<String, Value>;

/// Coerce an arbitrary value into top-level items.
///
/// Objects are taken as-is. Arrays become index-keyed mappings (`"0"`, `"1"`,
/// ...). Null and scalars have no keys to offer and become empty.
pub fn into_items(value: Value) -> Items {
    match value {
        Value::Object(map) => map,
        Value::Array(values) => values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), value))
            .collect(),
        _ => Items::new(),
    }
}

/// Short, human-readable name of a value's kind.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
