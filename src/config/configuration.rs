//! The observable configuration container.

use super::merge::{deep_merge_items, shallow_merge};
use super::path::{self, Walk};
use super::value::{Items, Value, into_items};
use crate::error::{ConfigError, Result};
use crate::loader::Loader;
use crate::observer::{Observable, Observer};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use std::ops::Index;
use std::sync::Arc;

/// Hierarchical configuration addressed by literal or dotted keys.
///
/// Mutations that change the stored tree notify attached observers
/// synchronously, after the change has been applied. `reset` and `flatten`
/// never notify.
///
/// All mutating methods take `&mut self`: the container is single-writer.
/// Wrap it in a `Mutex` or `RwLock` to share it between threads.
#[derive(Debug, Default)]
pub struct Configuration {
    items: Items,
    /// Snapshot taken at construction, restored by `reset`.
    original: Items,
    observers: Observable<Configuration>,
}

impl Configuration {
    pub fn new(items: Items) -> Self {
        Self {
            original: items.clone(),
            items,
            observers: Observable::new(),
        }
    }

    /// Build a configuration from whatever `loader` produces.
    ///
    /// Any zero-argument closure returning `anyhow::Result<Items>` is a
    /// loader too.
    pub fn load<L: Loader + ?Sized>(loader: &L) -> Result<Self> {
        loader.load().map(Self::new).map_err(ConfigError::Load)
    }

    /// Same as [`Configuration::load`].
    pub fn from_loader<L: Loader + ?Sized>(loader: &L) -> Result<Self> {
        Self::load(loader)
    }

    /// All items as an immutable view.
    pub fn all(&self) -> &Items {
        &self.items
    }

    pub fn into_items(self) -> Items {
        self.items
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by literal key, falling back to dotted traversal.
    pub fn get(&self, key: &str) -> Option<&Value> {
        path::lookup(&self.items, key)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// Get an item deserialized into `T`. `None` on a miss or a shape mismatch.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(|value| T::deserialize(value).ok())
    }

    /// Whether `key` is a literal top-level key.
    ///
    /// Unlike [`get`](Self::get) this never traverses dotted paths:
    /// `exists("app.debug")` is false for `{"app": {"debug": true}}`.
    pub fn exists(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Add an item if nothing is stored there yet.
    ///
    /// Missing intermediate mappings are created. If an intermediate segment
    /// holds a non-mapping value, nothing happens.
    pub fn add(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let Some((parent, last)) = path::parent_mut(&mut self.items, key, Walk::Create) else {
            return Ok(());
        };
        if parent.contains_key(last) {
            return Ok(());
        }
        parent.insert(last.to_string(), value.into());
        self.notify()
    }

    /// Add or overwrite an item, replacing non-mapping intermediates with
    /// empty mappings on the way.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        if let Some((parent, last)) = path::parent_mut(&mut self.items, key, Walk::Force) {
            parent.insert(last.to_string(), value.into());
        }
        self.notify()
    }

    /// Remove an item, returning it if it was present.
    ///
    /// Observers are notified only when something was actually removed.
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>> {
        let removed = path::parent_mut(&mut self.items, key, Walk::Existing)
            .and_then(|(parent, last)| parent.shift_remove(last));
        if removed.is_some() {
            self.notify()?;
        }
        Ok(removed)
    }

    /// Shallow-merge `mapping` over the mapping stored at `key`.
    ///
    /// Fails with [`ConfigError::InvalidOperation`] if `key` does not hold a
    /// mapping; the configuration is left untouched in that case.
    pub fn merge(&mut self, key: &str, mapping: Items) -> Result<()> {
        let current = self.mapping_at(key)?;
        self.set(key, Value::Object(shallow_merge(current, mapping)))
    }

    /// Like [`merge`](Self::merge), but nested mappings merge recursively.
    pub fn merge_deep(&mut self, key: &str, mapping: Items) -> Result<()> {
        let current = self.mapping_at(key)?;
        self.set(key, Value::Object(deep_merge_items(current, mapping)))
    }

    fn mapping_at(&self, key: &str) -> Result<Items> {
        match self.get(key) {
            Some(Value::Object(map)) => Ok(map.clone()),
            _ => Err(ConfigError::invalid_operation(key)),
        }
    }

    /// Collapse the tree into one level keyed by dotted leaf paths.
    ///
    /// `{"a": {"b": 1}}` becomes `{"a.b": 1}`. There is no inverse.
    pub fn flatten(&mut self) {
        let items = std::mem::take(&mut self.items);
        self.items = path::flatten(items);
    }

    /// Discard every change made since construction.
    pub fn reset(&mut self) -> &mut Self {
        self.items = self.original.clone();
        self
    }

    /// Edit the subtree at `path` through a temporary configuration.
    ///
    /// The closure receives a configuration seeded with the mapping at
    /// `path` (empty if there is none). When it returns `Ok`, the result is
    /// written back with a single [`set`](Self::set), so observers hear about
    /// the batch once. On `Err` nothing is written back.
    pub fn prefix<F>(&mut self, path: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Configuration) -> Result<()>,
    {
        let seed = match self.get(path) {
            Some(Value::Object(map)) => map.clone(),
            _ => Items::new(),
        };
        let mut partial = Configuration::new(seed);
        edit(&mut partial)?;
        self.set(path, Value::Object(partial.into_items()))
    }

    pub fn attach(&mut self, observer: Arc<dyn Observer<Configuration>>) {
        self.observers.attach(observer);
    }

    /// Detach the first handle identical to `observer`.
    pub fn detach(&mut self, observer: &Arc<dyn Observer<Configuration>>) -> bool {
        self.observers.detach(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Notify every attached observer, in attachment order.
    pub fn notify(&self) -> Result<()> {
        self.observers.notify(self).map_err(ConfigError::Observer)
    }
}

impl From<Items> for Configuration {
    fn from(items: Items) -> Self {
        Self::new(items)
    }
}

impl From<Value> for Configuration {
    fn from(value: Value) -> Self {
        Self::new(into_items(value))
    }
}

/// Copies the other configuration's current items. Observers are not copied.
impl From<&Configuration> for Configuration {
    fn from(other: &Configuration) -> Self {
        Self::new(other.items.clone())
    }
}

impl<K, V> FromIterator<(K, V)> for Configuration
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl Index<&str> for Configuration {
    type Output = Value;

    /// Missing keys index to `Value::Null`.
    fn index(&self, key: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.get(key).unwrap_or(&NULL)
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}
