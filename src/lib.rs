//! gestalt: hierarchical, observable configuration
//!
//! - [`config::Configuration`] - nested items with dotted-key access, scoped
//!   edits and change notification
//! - [`loader`] - directory loaders (INI, JSON, YAML, TOML) and layering
//! - [`observer`] - the observer primitives `Configuration` is built on

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod logging;
pub mod observer;

pub use config::Configuration;
pub use error::{ConfigError, ErrorCode, Result};
pub use loader::Loader;
pub use observer::Observer;
