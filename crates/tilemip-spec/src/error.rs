//! Error types for atlas configuration loading and validation.

use thiserror::Error;

/// Errors from parsing or validating an [`AtlasConfig`](crate::AtlasConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config document is not valid JSON or does not match the schema.
    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The config parsed but describes an unusable atlas.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates a [`ConfigError::Invalid`] from any message.
    pub fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid(message.into())
    }
}
