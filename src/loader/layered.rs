//! Layered loading: several loaders deep-merged in priority order.

use super::Loader;
use crate::config::{Items, deep_merge_all};
use anyhow::{Context, Result};
use std::fmt;
use tracing::debug;

/// Combines loaders from lowest to highest priority.
///
/// Mappings merge field by field; any other value from a later layer replaces
/// the earlier one. A failing layer fails the whole load.
///
/// ```no_run
/// use gestalt::config::Configuration;
/// use gestalt::loader::{DirectoryLoader, LayeredLoader};
///
/// let loader = LayeredLoader::new()
///     .with_layer(DirectoryLoader::yaml("config/defaults"))
///     .with_layer(DirectoryLoader::yaml("config/local").optional());
/// let config = Configuration::load(&loader).unwrap();
/// ```
#[derive(Default)]
pub struct LayeredLoader {
    layers: Vec<Box<dyn Loader + Send + Sync>>,
}

impl LayeredLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer on top of the existing ones.
    pub fn with_layer(mut self, layer: impl Loader + Send + Sync + 'static) -> Self {
        self.push(layer);
        self
    }

    pub fn push(&mut self, layer: impl Loader + Send + Sync + 'static) {
        self.layers.push(Box::new(layer));
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Loader for LayeredLoader {
    fn load(&self) -> Result<Items> {
        let mut loaded = Vec::with_capacity(self.layers.len());
        for (index, layer) in self.layers.iter().enumerate() {
            loaded.push(
                layer
                    .load()
                    .with_context(|| format!("failed to load config layer {index}"))?,
            );
        }

        let merged = deep_merge_all(loaded);
        debug!(layers = self.layers.len(), keys = merged.len(), "merged config layers");
        Ok(merged)
    }
}

impl fmt::Debug for LayeredLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredLoader")
            .field("layers", &self.layers.len())
            .finish()
    }
}
