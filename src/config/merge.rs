//! Merge strategies for configuration mappings.
//!
//! - [`shallow_merge`]: top-level keys of the overlay replace keys of the base.
//!   This is what [`Configuration::merge`](super::Configuration::merge) uses.
//! - [`deep_merge`]: mappings merge recursively, everything else is replaced.
//!   Used for layered loading and [`Configuration::merge_deep`](super::Configuration::merge_deep).

use super::value::{Items, Value};

/// Overlay `overlay` onto `base` one level deep. Overlay keys win.
pub fn shallow_merge(mut base: Items, overlay: Items) -> Items {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}

/// Deep merge two values, with `overlay` taking precedence over `base`.
///
/// - Mappings are merged recursively: keys in overlay override keys in base
/// - Sequences, strings, numbers, booleans are replaced entirely
/// - A null overlay keeps the base value (null means "not specified")
///
/// # Example
/// ```
/// use serde_json::json;
/// use gestalt::config::deep_merge;
///
/// let base = json!({"db": {"host": "localhost", "port": 5432}, "tags": ["a", "b"]});
/// let overlay = json!({"db": {"port": 6432}, "tags": ["c"]});
///
/// assert_eq!(
///     deep_merge(base, overlay),
///     json!({"db": {"host": "localhost", "port": 6432}, "tags": ["c"]})
/// );
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(deep_merge_items(base_map, overlay_map))
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// [`deep_merge`] specialised to mappings.
pub fn deep_merge_items(mut base: Items, overlay: Items) -> Items {
    for (key, overlay_value) in overlay {
        match base.get_mut(&key) {
            Some(slot) => {
                let base_value = std::mem::take(slot);
                *slot = deep_merge(base_value, overlay_value);
            }
            None => {
                base.insert(key, overlay_value);
            }
        }
    }
    base
}

/// Fold [`deep_merge_items`] over `layers`; later layers win.
pub fn deep_merge_all(layers: impl IntoIterator<Item = Items>) -> Items {
    layers.into_iter().fold(Items::new(), deep_merge_items)
}
