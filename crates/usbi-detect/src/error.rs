//! Error types for device enumeration

use thiserror::Error;

/// Errors that can occur during enumeration
#[derive(Debug, Error)]
pub enum DetectError {
    /// Failed to enumerate serial ports
    #[error("failed to enumerate serial ports: {0}")]
    EnumerationFailed(String),

    /// The USB backend could not list devices
    #[error("USB backend unavailable: {0}")]
    UsbBackend(String),

    /// A selected port is not among the enumerated ports
    #[error("port '{0}' not found")]
    PortNotFound(String),
}
