//! Serial Stream Reader
//!
//! Opens one serial port and reads text lines until the user stops the
//! stream or the port fails. Every exit path funnels through a single
//! cleanup point that releases the port exactly once.
//!
//! # Example
//!
//! ```rust,no_run
//! use usbi_stream::{StopSignal, StreamConfig, StreamReader};
//!
//! let reader = StreamReader::new(StreamConfig::default());
//! let stop = StopSignal::new();
//!
//! let report = reader.stream_lines("/dev/ttyUSB0", 115_200, &stop, |line| {
//!     println!("{}", line);
//!     Ok::<(), std::io::Error>(())
//! });
//! println!("{}", report.outcome);
//! ```

pub mod error;
pub mod reader;
pub mod session;
pub mod signal;
pub mod transport;

pub use error::StreamError;
pub use reader::{decode_line, StreamConfig, StreamOutcome, StreamReader, StreamReport};
pub use session::StreamSession;
pub use signal::StopSignal;
pub use transport::{SerialPortTransport, SerialTransport};
