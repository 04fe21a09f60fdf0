//! Stream session: scoped ownership of one open port

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::StreamError;
use crate::transport::{SerialPortTransport, SerialTransport};

/// One open serial connection
///
/// The transport is released exactly once: either by an explicit
/// [`close`](Self::close) or when the session is dropped. Further closes are
/// no-ops.
pub struct StreamSession<T: SerialTransport> {
    port_path: String,
    baud_rate: u32,
    transport: Option<T>,
}

impl<T: SerialTransport> StreamSession<T> {
    /// Wrap an already-open transport
    pub fn new(port_path: impl Into<String>, baud_rate: u32, transport: T) -> Self {
        Self {
            port_path: port_path.into(),
            baud_rate,
            transport: Some(transport),
        }
    }

    pub fn port_path(&self) -> &str {
        &self.port_path
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    pub(crate) fn transport_mut(&mut self) -> Result<&mut T, StreamError> {
        self.transport.as_mut().ok_or(StreamError::Closed)
    }

    /// Release the port. The transport is dropped even if its close fails.
    pub fn close(&mut self) -> Result<(), StreamError> {
        match self.transport.take() {
            Some(mut transport) => {
                debug!("Closing {}", self.port_path);
                transport.close()
            }
            None => Ok(()),
        }
    }
}

impl StreamSession<SerialPortTransport> {
    /// Open a real serial port
    pub fn open(port_path: &str, baud_rate: u32, timeout: Duration) -> Result<Self, StreamError> {
        let transport = SerialPortTransport::open(port_path, baud_rate, timeout)?;
        Ok(Self::new(port_path, baud_rate, transport))
    }
}

impl<T: SerialTransport> Drop for StreamSession<T> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close {}: {}", self.port_path, e);
        }
    }
}
