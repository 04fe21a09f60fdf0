//! Error types for serial streaming

use thiserror::Error;

/// Errors that can end a stream session
#[derive(Debug, Error)]
pub enum StreamError {
    /// Serial layer error (open failure, device removed, ...)
    #[error("{0}")]
    Serial(#[from] serialport::Error),

    /// I/O error while reading
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Port used after it was closed
    #[error("port is closed")]
    Closed,

    /// Anything that is not a transport failure
    #[error("{0}")]
    Unexpected(String),
}

impl StreamError {
    /// Whether the error came from the serial transport itself
    pub fn is_transport(&self) -> bool {
        !matches!(self, StreamError::Unexpected(_))
    }
}
