//! Directory loader: one configuration entry per file.

use super::{Format, Loader};
use crate::config::{Items, Value};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Loads every file of one format from a directory (non-recursive).
///
/// `config/app.yaml` and `config/mail.yaml` load as `{"app": ..., "mail": ...}`.
/// Only the last extension is stripped, so `app.local.yaml` becomes
/// `app.local`. Files are read in file-name order, so when two files share a
/// stem (`app.yaml` and `app.yml`) the later one replaces the earlier and a
/// warning is logged.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    directory: PathBuf,
    format: Format,
    /// Whether a missing directory is an error or an empty result.
    required: bool,
}

impl DirectoryLoader {
    pub fn new(directory: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            directory: directory.into(),
            format,
            required: true,
        }
    }

    pub fn ini(directory: impl Into<PathBuf>) -> Self {
        Self::new(directory, Format::Ini)
    }

    pub fn json(directory: impl Into<PathBuf>) -> Self {
        Self::new(directory, Format::Json)
    }

    pub fn yaml(directory: impl Into<PathBuf>) -> Self {
        Self::new(directory, Format::Yaml)
    }

    pub fn toml(directory: impl Into<PathBuf>) -> Self {
        Self::new(directory, Format::Toml)
    }

    /// Treat a missing directory as empty instead of failing.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Read and decode a single file.
    pub fn translate_file(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        self.format
            .decode(&content)
            .with_context(|| format!("failed to decode {} as {}", path.display(), self.format))
    }

    /// Matching files as `(config name, path)`, sorted by path.
    fn matching_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(&self.directory).with_context(|| {
            format!("failed to read config directory {}", self.directory.display())
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("failed to list {}", self.directory.display()))?
                .path();

            if !path.is_file() {
                trace!(path = %path.display(), "skipping non-file entry");
                continue;
            }
            let extension = path.extension().and_then(|e| e.to_str());
            if !extension.is_some_and(|ext| self.format.matches(ext)) {
                trace!(path = %path.display(), format = %self.format, "skipping file with other extension");
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                trace!(path = %path.display(), "skipping file with non UTF-8 name");
                continue;
            };
            files.push((name.to_string(), path.clone()));
        }

        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }
}

impl Loader for DirectoryLoader {
    fn load(&self) -> Result<Items> {
        if !self.required && !self.directory.exists() {
            debug!(directory = %self.directory.display(), "optional config directory missing, skipping");
            return Ok(Items::new());
        }

        let mut items = Items::new();
        for (name, path) in self.matching_files()? {
            let value = self.translate_file(&path)?;
            if items.insert(name, value).is_some() {
                warn!(path = %path.display(), "config file replaces an earlier file with the same name");
            }
        }

        debug!(
            directory = %self.directory.display(),
            format = %self.format,
            files = items.len(),
            "loaded config directory"
        );
        Ok(items)
    }
}
