//! Descriptor Formatting Library
//!
//! Converts enumerated descriptors into display records and renders them.
//! A [`DisplayRecord`] is the single source for both the table and the JSON
//! output, so the two modes always carry the same keys and values.
//!
//! # Example
//!
//! ```rust
//! use usbi_detect::DeviceDescriptor;
//! use usbi_report::{filter_by_keyword, render_table, View};
//!
//! let devices = vec![
//!     DeviceDescriptor::new(0x1234, 0x0001).with_product("Widget"),
//!     DeviceDescriptor::new(0x5678, 0x0002).with_product("Gadget"),
//! ];
//!
//! let gadgets = filter_by_keyword(devices, "gadget");
//! println!("{}", render_table(&gadgets, View::Summary));
//! ```

pub mod error;
pub mod filter;
pub mod record;
pub mod render;
pub mod reporter;

pub use error::ReportError;
pub use filter::{filter_by_keyword, matches_keyword};
pub use record::{format_id, Describe, DisplayRecord};
pub use render::{render_json, render_json_one, render_table, View};
pub use reporter::{ReportConfig, Reporter};
