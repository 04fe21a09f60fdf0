//! Serial transport abstraction

use std::io::{BufRead, BufReader, ErrorKind};
use std::time::Duration;

use serialport::SerialPort;
use tracing::debug;

use crate::error::StreamError;

/// Byte source the stream loop reads from
pub trait SerialTransport {
    /// Number of bytes ready to be read without waiting
    fn bytes_available(&mut self) -> Result<usize, StreamError>;

    /// Append bytes up to and including the next `\n` to `buf`.
    ///
    /// If the read timeout expires first, whatever arrived is kept in `buf`.
    /// Returns the number of bytes appended.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<usize, StreamError>;

    /// Release the underlying handle. Closing twice is a no-op.
    fn close(&mut self) -> Result<(), StreamError>;
}

/// Transport over a real serial port
pub struct SerialPortTransport {
    reader: Option<BufReader<Box<dyn SerialPort>>>,
}

impl SerialPortTransport {
    /// Open `path` at `baud_rate`; reads give up after `timeout`
    pub fn open(path: &str, baud_rate: u32, timeout: Duration) -> Result<Self, StreamError> {
        let port = serialport::new(path, baud_rate).timeout(timeout).open()?;
        debug!("Opened {} at {} baud (timeout {:?})", path, baud_rate, timeout);
        Ok(Self::from_port(port))
    }

    /// Wrap a port that is already open
    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        Self {
            reader: Some(BufReader::new(port)),
        }
    }

    fn reader(&mut self) -> Result<&mut BufReader<Box<dyn SerialPort>>, StreamError> {
        self.reader.as_mut().ok_or(StreamError::Closed)
    }
}

impl SerialTransport for SerialPortTransport {
    fn bytes_available(&mut self) -> Result<usize, StreamError> {
        let reader = self.reader()?;
        let buffered = reader.buffer().len();
        let pending = reader.get_ref().bytes_to_read()? as usize;
        Ok(buffered + pending)
    }

    fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<usize, StreamError> {
        let start = buf.len();
        match self.reader()?.read_until(b'\n', buf) {
            Ok(n) => Ok(n),
            // read_until keeps the partial data it consumed before the timeout
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(buf.len() - start),
            Err(e) => Err(e.into()),
        }
    }

    fn close(&mut self) -> Result<(), StreamError> {
        // serialport releases the handle on drop
        self.reader.take();
        Ok(())
    }
}
