//! Supported configuration file formats.

use super::ini;
use crate::config::Value;
use anyhow::Result;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// File format understood by [`DirectoryLoader`](super::DirectoryLoader).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Ini,
    Json,
    /// `.yaml` and `.yml`
    Yaml,
    Toml,
}

#[derive(Debug, Error)]
#[error("unknown config format '{0}' (expected ini, json, yaml or toml)")]
pub struct UnknownFormat(pub String);

impl Format {
    /// Canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Ini => "ini",
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }

    /// Whether a file extension belongs to this format. Case-sensitive.
    pub fn matches(&self, extension: &str) -> bool {
        match self {
            Format::Yaml => matches!(extension, "yaml" | "yml"),
            _ => extension == self.extension(),
        }
    }

    /// Decode file contents into a value.
    pub fn decode(&self, content: &str) -> Result<Value> {
        let value = match self {
            Format::Ini => ini::parse(content)?,
            Format::Json => serde_json::from_str(content)?,
            Format::Yaml => serde_yaml::from_str(content)?,
            Format::Toml => toml::from_str(content)?,
        };
        Ok(value)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ini" => Ok(Format::Ini),
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}
