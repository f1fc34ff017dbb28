//! Error types for the explorer core.

use thiserror::Error;

/// Errors that can occur while stepping or configuring the explorer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// An operation needed the newest position of a path that has none.
    #[error("empty path: cannot advance a path with no positions")]
    EmptyPath,

    /// Configuration rejected by validation or parsing
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rendering collaborator failed during scene setup
    #[error("Render error: {0}")]
    Render(String),
}

impl CoreError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Creates a render error.
    pub fn render(msg: impl std::fmt::Display) -> Self {
        Self::Render(msg.to_string())
    }
}
