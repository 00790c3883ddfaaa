//! Structured error types for configuration operations.

use serde::Serialize;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A mutation was asked to operate on a value of the wrong shape.
    InvalidOperation,
    /// An attached observer failed while being notified.
    ObserverFailed,
    /// A loader could not produce configuration items.
    LoadFailed,
}

/// Errors raised by [`Configuration`](crate::config::Configuration).
///
/// Most shape problems are silent no-ops; only `merge` fails loudly when its
/// target is not a mapping.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("value at '{key}' must be a mapping to merge")]
    InvalidOperation { key: String },

    #[error("observer failed: {0:#}")]
    Observer(anyhow::Error),

    #[error("failed to load configuration: {0:#}")]
    Load(anyhow::Error),
}

impl ConfigError {
    pub fn invalid_operation(key: impl Into<String>) -> Self {
        Self::InvalidOperation { key: key.into() }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::InvalidOperation { .. } => ErrorCode::InvalidOperation,
            ConfigError::Observer(_) => ErrorCode::ObserverFailed,
            ConfigError::Load(_) => ErrorCode::LoadFailed,
        }
    }

    /// The key the error refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidOperation { key } => Some(key),
            _ => None,
        }
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
