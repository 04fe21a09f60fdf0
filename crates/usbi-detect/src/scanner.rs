//! Serial port scanner
//!
//! This module provides serial port enumeration.

use serialport::{available_ports, SerialPortType};
use tracing::{debug, info};

use crate::descriptor::{PortDescriptor, PortKind};
use crate::error::DetectError;

/// Source of serial port snapshots
pub trait PortEnumerator {
    /// List the serial ports currently attached to the host
    fn list_ports(&self) -> Result<Vec<PortDescriptor>, DetectError>;
}

impl PortDescriptor {
    /// Create from serialport crate's port info
    fn from_serialport(name: String, port_type: &SerialPortType) -> Self {
        let mut port = PortDescriptor::new(name);
        match port_type {
            SerialPortType::UsbPort(usb) => {
                port.kind = PortKind::Usb;
                port.vendor_id = Some(usb.vid);
                port.product_id = Some(usb.pid);
                port.serial_number = usb.serial_number.clone();
                port.manufacturer = usb.manufacturer.clone();
                port.description = usb.product.clone();
                port.location = usb_location(&port.name);
            }
            SerialPortType::PciPort => port.kind = PortKind::Pci,
            SerialPortType::BluetoothPort => port.kind = PortKind::Bluetooth,
            SerialPortType::Unknown => {}
        }
        port
    }
}

/// USB interface path of a tty (e.g. `1-1.2:1.0`), read from sysfs
#[cfg(target_os = "linux")]
fn usb_location(name: &str) -> Option<String> {
    let device = std::fs::canonicalize(format!("/sys/class/tty/{}/device", name)).ok()?;
    // ttyUSB devices hang one level below the interface directory
    let interface = if device
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("ttyUSB"))
    {
        device.parent()?.to_path_buf()
    } else {
        device
    };
    interface
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}

#[cfg(not(target_os = "linux"))]
fn usb_location(_name: &str) -> Option<String> {
    None
}

/// Scanner configuration
#[derive(Debug, Clone, Default)]
pub struct ScannerConfig {
    /// Log backend details of every enumerated entry
    pub debug: bool,
    /// Skip ports whose path contains any of these patterns
    pub skip_patterns: Vec<String>,
}

/// Serial port scanner
pub struct PortScanner {
    config: ScannerConfig,
}

impl PortScanner {
    /// Create a new scanner with default configuration
    pub fn new() -> Self {
        Self {
            config: ScannerConfig::default(),
        }
    }

    /// Create a scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Check if a port should be skipped
    fn should_skip_port(&self, port: &PortDescriptor) -> bool {
        self.config
            .skip_patterns
            .iter()
            .any(|pattern| port.device_path.contains(pattern.as_str()))
    }
}

impl PortEnumerator for PortScanner {
    fn list_ports(&self) -> Result<Vec<PortDescriptor>, DetectError> {
        info!("Enumerating serial ports...");
        let ports = available_ports().map_err(|e| DetectError::EnumerationFailed(e.to_string()))?;

        let result: Vec<_> = ports
            .into_iter()
            .inspect(|p| {
                if self.config.debug {
                    debug!("serialport backend entry: {:?}", p);
                }
            })
            .map(|p| PortDescriptor::from_serialport(p.port_name, &p.port_type))
            .filter(|p| !self.should_skip_port(p))
            .collect();

        if result.is_empty() {
            info!("No serial ports found");
        } else {
            info!("Found {} serial port(s)", result.len());
            for port in &result {
                info!("  {} - {}", port.device_path, port.description());
            }
        }

        Ok(result)
    }
}

impl Default for PortScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up an enumerated port by its device path
pub fn find_port<'a>(
    ports: &'a [PortDescriptor],
    device_path: &str,
) -> Result<&'a PortDescriptor, DetectError> {
    ports
        .iter()
        .find(|p| p.device_path == device_path)
        .ok_or_else(|| DetectError::PortNotFound(device_path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::UsbPortInfo;

    #[test]
    fn test_port_descriptor_from_usb() {
        let usb_info = SerialPortType::UsbPort(UsbPortInfo {
            vid: 0x0403,
            pid: 0x6001,
            serial_number: Some("12345".to_string()),
            manufacturer: Some("FTDI".to_string()),
            product: Some("FT232R".to_string()),
        });

        let info = PortDescriptor::from_serialport("/dev/ttyUSB0".to_string(), &usb_info);

        assert_eq!(info.kind, PortKind::Usb);
        assert_eq!(info.vendor_id, Some(0x0403));
        assert_eq!(info.product_id, Some(0x6001));
        assert_eq!(info.description(), "FT232R");
        assert_eq!(info.manufacturer(), "FTDI");
        assert_eq!(info.name, "ttyUSB0");
    }

    #[test]
    fn test_port_descriptor_from_pci() {
        let info = PortDescriptor::from_serialport("/dev/ttyS0".to_string(), &SerialPortType::PciPort);

        assert_eq!(info.kind, PortKind::Pci);
        assert_eq!(info.vendor_id, None);
        assert_eq!(info.description(), "Unknown");
        assert_eq!(info.hardware_id(), "PCI");
    }

    #[test]
    fn skip_patterns_match_device_path() {
        let scanner = PortScanner::with_config(ScannerConfig {
            debug: false,
            skip_patterns: vec!["Bluetooth".to_string()],
        });

        assert!(scanner.should_skip_port(&PortDescriptor::new("/dev/tty.Bluetooth-Incoming-Port")));
        assert!(!scanner.should_skip_port(&PortDescriptor::new("/dev/ttyUSB0")));
    }

    #[test]
    fn find_port_by_path() {
        let ports = vec![
            PortDescriptor::new("/dev/ttyUSB0"),
            PortDescriptor::new("/dev/ttyACM0"),
        ];

        assert_eq!(find_port(&ports, "/dev/ttyACM0").unwrap().name, "ttyACM0");
        assert!(matches!(
            find_port(&ports, "/dev/ttyXYZ"),
            Err(DetectError::PortNotFound(p)) if p == "/dev/ttyXYZ"
        ));
    }
}
