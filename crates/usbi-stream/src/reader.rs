//! The line-reading loop
//!
//! [`StreamReader::run`] reads lines from a session until one of three things
//! happens: the [`StopSignal`] fires, the transport fails, or something else
//! goes wrong (for example the line callback fails). Whatever the cause, the
//! session is closed before the loop returns, and the cause is reported as a
//! [`StreamOutcome`] rather than an error.

use std::fmt;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::StreamError;
use crate::session::StreamSession;
use crate::signal::StopSignal;
use crate::transport::SerialTransport;

/// Stream loop timing
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Serial read timeout; bounds how long a read can delay a stop
    pub read_timeout: Duration,
    /// Sleep between polls while no input is pending
    pub idle_poll: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(1),
            idle_poll: Duration::from_millis(10),
        }
    }
}

/// Why a stream ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The stop signal fired
    Stopped,
    /// The serial layer failed to open or read
    TransportFailed(String),
    /// Any other failure
    Unexpected(String),
}

impl StreamOutcome {
    pub fn is_error(&self) -> bool {
        !matches!(self, StreamOutcome::Stopped)
    }
}

impl From<StreamError> for StreamOutcome {
    fn from(err: StreamError) -> Self {
        if err.is_transport() {
            StreamOutcome::TransportFailed(err.to_string())
        } else {
            StreamOutcome::Unexpected(err.to_string())
        }
    }
}

impl fmt::Display for StreamOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamOutcome::Stopped => write!(f, "Stopped by user."),
            StreamOutcome::TransportFailed(msg) => write!(f, "Serial error: {}", msg),
            StreamOutcome::Unexpected(msg) => write!(f, "Unexpected error: {}", msg),
        }
    }
}

/// Result of one stream session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamReport {
    pub outcome: StreamOutcome,
    /// Lines delivered to the callback
    pub lines: u64,
}

/// Decode raw line bytes, substituting invalid UTF-8 and dropping trailing whitespace
pub fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}

/// Serial line reader
pub struct StreamReader {
    config: StreamConfig,
}

impl StreamReader {
    pub fn new(config: StreamConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Open `port_path` and deliver each line to `on_line` until stopped or failed
    pub fn stream_lines<F, E>(
        &self,
        port_path: &str,
        baud_rate: u32,
        stop: &StopSignal,
        on_line: F,
    ) -> StreamReport
    where
        F: FnMut(&str) -> Result<(), E>,
        E: fmt::Display,
    {
        let mut session = match StreamSession::open(port_path, baud_rate, self.config.read_timeout)
        {
            Ok(session) => session,
            Err(e) => {
                warn!("Failed to open {}: {}", port_path, e);
                return StreamReport {
                    outcome: e.into(),
                    lines: 0,
                };
            }
        };

        info!("Listening to {} at {} baud", port_path, baud_rate);
        self.run(&mut session, stop, on_line)
    }

    /// Run the loop on an open session; the session is closed on return
    pub fn run<T, F, E>(
        &self,
        session: &mut StreamSession<T>,
        stop: &StopSignal,
        mut on_line: F,
    ) -> StreamReport
    where
        T: SerialTransport,
        F: FnMut(&str) -> Result<(), E>,
        E: fmt::Display,
    {
        let mut lines = 0;
        let result = self.read_loop(session, stop, &mut on_line, &mut lines);

        // a close failure is logged but never replaces the loop's outcome
        if let Err(e) = session.close() {
            warn!("Failed to close {}: {}", session.port_path(), e);
        }

        let outcome = match result {
            Ok(()) => StreamOutcome::Stopped,
            Err(e) => e.into(),
        };
        info!(
            "Stream on {} ended after {} line(s): {}",
            session.port_path(),
            lines,
            outcome
        );

        StreamReport { outcome, lines }
    }

    fn read_loop<T, F, E>(
        &self,
        session: &mut StreamSession<T>,
        stop: &StopSignal,
        on_line: &mut F,
        lines: &mut u64,
    ) -> Result<(), StreamError>
    where
        T: SerialTransport,
        F: FnMut(&str) -> Result<(), E>,
        E: fmt::Display,
    {
        let mut buf = Vec::with_capacity(256);

        while !stop.is_triggered() {
            let transport = session.transport_mut()?;

            if transport.bytes_available()? == 0 {
                if !self.config.idle_poll.is_zero() {
                    thread::sleep(self.config.idle_poll);
                }
                continue;
            }

            buf.clear();
            if transport.read_line(&mut buf)? == 0 {
                continue;
            }

            let line = decode_line(&buf);
            debug!("rx {:?}", line);
            on_line(&line).map_err(|e| StreamError::Unexpected(e.to_string()))?;
            *lines += 1;
        }

        Ok(())
    }
}

impl Default for StreamReader {
    fn default() -> Self {
        Self::new(StreamConfig::default())
    }
}
