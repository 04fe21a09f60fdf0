//! Serial Port and USB Device Enumeration
//!
//! This crate takes snapshots of the serial ports and USB devices currently
//! attached to the host. Every call is a blocking query to the platform;
//! an empty host produces an empty list, never an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use usbi_detect::{PortEnumerator, PortScanner};
//!
//! let scanner = PortScanner::new();
//! let ports = scanner.list_ports().unwrap();
//!
//! for port in ports {
//!     println!("Found port: {}", port.device_path);
//! }
//! ```

pub mod descriptor;
pub mod error;
pub mod scanner;
pub mod usb;

pub use descriptor::{or_unknown, DeviceDescriptor, PortDescriptor, PortKind, UNKNOWN};
pub use error::DetectError;
pub use scanner::{find_port, PortEnumerator, PortScanner, ScannerConfig};
pub use usb::{DeviceEnumerator, UsbScanner};
