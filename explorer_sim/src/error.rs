//! Error types for the explorer simulation harness.

use explorer_core::CoreError;
use thiserror::Error;

/// Errors that can occur while driving or exporting a run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Core rejected the configuration or a frame update
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading a config file or writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
