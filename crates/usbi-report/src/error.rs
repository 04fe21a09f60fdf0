//! Error types for rendering

use thiserror::Error;

/// Errors that can occur while rendering records
#[derive(Debug, Error)]
pub enum ReportError {
    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialized JSON was not valid UTF-8
    #[error("JSON output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
