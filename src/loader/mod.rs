//! Loaders produce the initial items of a [`Configuration`](crate::config::Configuration).
//!
//! - [`DirectoryLoader`]: one entry per file in a directory, keyed by file
//!   name without extension, decoded according to a [`Format`]
//! - [`LayeredLoader`]: deep-merges several loaders, later layers win
//! - any `Fn() -> anyhow::Result<Items>` closure

mod directory;
mod format;
mod ini;
mod layered;

pub use directory::DirectoryLoader;
pub use format::{Format, UnknownFormat};
pub use layered::LayeredLoader;

use crate::config::Items;
use anyhow::Result;

/// A source of configuration items.
pub trait Loader {
    /// Load the configuration items.
    fn load(&self) -> Result<Items>;
}

impl<F> Loader for F
where
    F: Fn() -> Result<Items>,
{
    fn load(&self) -> Result<Items> {
        self()
    }
}
