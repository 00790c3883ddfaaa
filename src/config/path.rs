//! Dotted-key addressing over configuration trees.
//!
//! A key like `database.drivers.mysql` names a path through nested mappings.
//! Lookups try the whole string as a literal top-level key before splitting
//! it, so `{"a.b": 1}` answers `a.b` without traversal.

use super::value::{Items, Value};

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// How intermediate segments are handled while walking towards a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Every intermediate must already exist and be a mapping.
    Existing,
    /// Missing intermediates become empty mappings; a non-mapping stops the walk.
    Create,
    /// Missing or non-mapping intermediates are replaced by empty mappings.
    Force,
}

/// Resolve `key` against `items`, literal key first, then dotted traversal.
pub fn lookup<'a>(items: &'a Items, key: &str) -> Option<&'a Value> {
    if let Some(value) = items.get(key) {
        return Some(value);
    }

    let mut segments = key.split(SEPARATOR);
    let mut node = items.get(segments.next()?)?;
    for segment in segments {
        node = node.as_object()?.get(segment)?;
    }
    Some(node)
}

/// Walk every segment of `key` but the last, returning the mapping that
/// should hold the final segment together with that segment.
///
/// Returns `None` when the walk cannot continue under the given policy. With
/// [`Walk::Create`], a stop only ever happens before anything was created,
/// since every level below a freshly created mapping is empty.
pub fn parent_mut<'a, 'k>(
    items: &'a mut Items,
    key: &'k str,
    walk: Walk,
) -> Option<(&'a mut Items, &'k str)> {
    let (intermediate, last) = match key.rsplit_once(SEPARATOR) {
        Some((intermediate, last)) => (Some(intermediate), last),
        None => (None, key),
    };

    let mut node = items;
    for segment in intermediate.into_iter().flat_map(|path| path.split(SEPARATOR)) {
        let child = match walk {
            Walk::Existing => node.get_mut(segment)?,
            Walk::Create | Walk::Force => node
                .entry(segment)
                .or_insert_with(|| Value::Object(Items::new())),
        };
        if !child.is_object() {
            if walk != Walk::Force {
                return None;
            }
            *child = Value::Object(Items::new());
        }
        node = child.as_object_mut()?;
    }
    Some((node, last))
}

/// Collapse a tree into a single level keyed by full dotted leaf paths.
///
/// Anything that is not a mapping is a leaf, sequences included. Empty
/// mappings have no leaves and disappear.
pub fn flatten(items: Items) -> Items {
    let mut flat = Items::new();
    flatten_into(None, items, &mut flat);
    flat
}

fn flatten_into(prefix: Option<&str>, items: Items, flat: &mut Items) {
    for (key, value) in items {
        let path = match prefix {
            Some(prefix) => format!("{prefix}{SEPARATOR}{key}"),
            None => key,
        };
        match value {
            Value::Object(children) => flatten_into(Some(&path), children, flat),
            leaf => {
                flat.insert(path, leaf);
            }
        }
    }
}
