//! Device and port descriptors
//!
//! Descriptors are immutable snapshots taken at enumeration time. A device
//! seen in two scans produces two unrelated descriptors.

use std::path::Path;

/// Placeholder for string fields the platform did not report
pub const UNKNOWN: &str = "Unknown";

/// Resolve an optional descriptor string to its display value
pub fn or_unknown(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => s,
        _ => UNKNOWN,
    }
}

/// Snapshot of one USB device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// USB Vendor ID
    pub vendor_id: u16,
    /// USB Product ID
    pub product_id: u16,
    /// Manufacturer string descriptor
    pub manufacturer: Option<String>,
    /// Product string descriptor
    pub product: Option<String>,
    /// Serial number string descriptor
    pub serial_number: Option<String>,
}

impl DeviceDescriptor {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            manufacturer: None,
            product: None,
            serial_number: None,
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn manufacturer(&self) -> &str {
        or_unknown(&self.manufacturer)
    }

    pub fn product(&self) -> &str {
        or_unknown(&self.product)
    }

    pub fn serial_number(&self) -> &str {
        or_unknown(&self.serial_number)
    }
}

/// Kind of serial port, as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Usb,
    Pci,
    Bluetooth,
    Unknown,
}

/// Snapshot of one serial port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDescriptor {
    /// Short name (final component of the device path)
    pub name: String,
    /// Path used to open the port (e.g., /dev/ttyUSB0, COM3)
    pub device_path: String,
    /// Human readable description, usually the USB product string
    pub description: Option<String>,
    /// USB manufacturer string
    pub manufacturer: Option<String>,
    /// Port kind
    pub kind: PortKind,
    /// USB Vendor ID (if USB)
    pub vendor_id: Option<u16>,
    /// USB Product ID (if USB)
    pub product_id: Option<u16>,
    /// USB serial number (if available)
    pub serial_number: Option<String>,
    /// Physical location, e.g. the USB interface path on Linux
    pub location: Option<String>,
}

impl PortDescriptor {
    /// Create a descriptor with only a device path; all metadata unknown
    pub fn new(device_path: impl Into<String>) -> Self {
        let device_path = device_path.into();
        Self {
            name: short_name(&device_path),
            device_path,
            description: None,
            manufacturer: None,
            kind: PortKind::Unknown,
            vendor_id: None,
            product_id: None,
            serial_number: None,
            location: None,
        }
    }

    pub fn description(&self) -> &str {
        or_unknown(&self.description)
    }

    pub fn manufacturer(&self) -> &str {
        or_unknown(&self.manufacturer)
    }

    pub fn location(&self) -> &str {
        or_unknown(&self.location)
    }

    /// Hardware identifier in the `USB VID:PID=0403:6001 SER=...` form
    pub fn hardware_id(&self) -> String {
        match (self.kind, self.vendor_id, self.product_id) {
            (PortKind::Usb, Some(vid), Some(pid)) => {
                let mut id = format!("USB VID:PID={:04X}:{:04X}", vid, pid);
                if let Some(serial) = &self.serial_number {
                    id.push_str(" SER=");
                    id.push_str(serial);
                }
                if let Some(location) = &self.location {
                    id.push_str(" LOCATION=");
                    id.push_str(location);
                }
                id
            }
            (PortKind::Pci, _, _) => "PCI".to_string(),
            (PortKind::Bluetooth, _, _) => "Bluetooth".to_string(),
            _ => UNKNOWN.to_string(),
        }
    }
}

/// Final path component of a device path (`/dev/ttyUSB0` -> `ttyUSB0`)
fn short_name(device_path: &str) -> String {
    Path::new(device_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(device_path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_strings_resolve_to_unknown() {
        let dev = DeviceDescriptor::new(0x1234, 0x0001).with_product("Widget");

        assert_eq!(dev.manufacturer(), UNKNOWN);
        assert_eq!(dev.product(), "Widget");
        assert_eq!(dev.serial_number(), UNKNOWN);
    }

    #[test]
    fn blank_strings_resolve_to_unknown() {
        assert_eq!(or_unknown(&Some("   ".to_string())), UNKNOWN);
        assert_eq!(or_unknown(&Some(String::new())), UNKNOWN);
        assert_eq!(or_unknown(&None), UNKNOWN);
    }

    #[test]
    fn port_name_is_last_path_component() {
        assert_eq!(PortDescriptor::new("/dev/ttyUSB0").name, "ttyUSB0");
        assert_eq!(PortDescriptor::new("COM3").name, "COM3");
    }

    #[test]
    fn usb_hardware_id() {
        let mut port = PortDescriptor::new("/dev/ttyUSB0");
        port.kind = PortKind::Usb;
        port.vendor_id = Some(0x0403);
        port.product_id = Some(0x6001);
        port.serial_number = Some("A12345".to_string());

        assert_eq!(port.hardware_id(), "USB VID:PID=0403:6001 SER=A12345");
    }

    #[test]
    fn non_usb_hardware_id() {
        let mut port = PortDescriptor::new("/dev/ttyS0");
        assert_eq!(port.hardware_id(), UNKNOWN);

        port.kind = PortKind::Pci;
        assert_eq!(port.hardware_id(), "PCI");
    }
}
