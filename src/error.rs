//! Error types for Cyclear
//!
//! The engines degrade gracefully on malformed signal data. The only errors they
//! raise are precondition violations from the calling layer.

use thiserror::Error;

/// Result type for Cyclear operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Caller passed a value outside the documented domain
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// True for errors caused by bad caller input
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}
