//! Output formatting for configuration trees.

use crate::config::{Items, Value, flatten};
use anyhow::Result;

/// Output format for printed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    /// One `dotted.key = value` line per leaf.
    Flat,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "flat" | "dotted" => Some(OutputFormat::Flat),
            _ => None,
        }
    }
}

/// Render a whole tree.
pub fn format_items(items: &Items, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(items)?),
        OutputFormat::Flat => Ok(format_flat(items)),
    }
}

/// Render a single value. Scalars print bare in `Flat` mode.
pub fn format_value(value: &Value, format: OutputFormat) -> Result<String> {
    match (format, value) {
        (_, Value::Object(items)) => format_items(items, format),
        (OutputFormat::Flat, Value::String(text)) => Ok(text.clone()),
        (OutputFormat::Yaml, value) => Ok(serde_yaml::to_string(value)?),
        (_, value) => Ok(serde_json::to_string_pretty(value)?),
    }
}

fn format_flat(items: &Items) -> String {
    let mut out = String::new();
    for (key, value) in flatten(items.clone()) {
        out.push_str(&format!("{key} = {value}\n"));
    }
    out
}
