//! Hierarchical configuration container.
//!
//! [`Configuration`] holds an ordered tree of values addressed by literal or
//! dotted keys:
//!
//! ```
//! use gestalt::config::Configuration;
//! use serde_json::json;
//!
//! let mut config = Configuration::from(json!({"app": {"debug": true}}));
//! assert_eq!(config.get("app.debug"), Some(&json!(true)));
//!
//! config.set("app.locale", "en").unwrap();
//! assert_eq!(config["app.locale"], json!("en"));
//! ```
//!
//! ## Key resolution
//! - `get` tries the whole key as a literal top-level key, then walks the
//!   dotted segments through nested mappings
//! - `exists` only checks literal top-level keys
//! - `add`, `set` and `remove` always walk the dotted segments, even when a
//!   literal top-level key matches the whole key
//!
//! ## Notifications
//! `set`, `merge`, `merge_deep` and `prefix` notify attached observers once
//! per call. `add` and `remove` notify only when they inserted or deleted
//! something. `flatten` and `reset` never notify.

mod configuration;
mod merge;
mod path;
mod value;

pub use configuration::Configuration;
pub use merge::{deep_merge, deep_merge_all, deep_merge_items, shallow_merge};
pub use path::{SEPARATOR, flatten};
pub use value::{Items, Value, into_items, kind_name};
