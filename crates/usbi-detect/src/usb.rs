//! USB device scanner

use nusb::MaybeFuture;
use tracing::{debug, info};

use crate::descriptor::DeviceDescriptor;
use crate::error::DetectError;
use crate::scanner::ScannerConfig;

/// Source of USB device snapshots
pub trait DeviceEnumerator {
    /// List the USB devices currently attached to the host
    fn list_usb_devices(&self) -> Result<Vec<DeviceDescriptor>, DetectError>;
}

/// USB device scanner backed by nusb
pub struct UsbScanner {
    config: ScannerConfig,
}

impl UsbScanner {
    pub fn new() -> Self {
        Self {
            config: ScannerConfig::default(),
        }
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }
}

impl Default for UsbScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceEnumerator for UsbScanner {
    fn list_usb_devices(&self) -> Result<Vec<DeviceDescriptor>, DetectError> {
        info!("Enumerating USB devices...");
        // list_devices() returns MaybeFuture; wait() blocks on it
        let devices: Vec<DeviceDescriptor> = nusb::list_devices()
            .wait()
            .map_err(|e| DetectError::UsbBackend(e.to_string()))?
            .map(|dev| {
                if self.config.debug {
                    debug!(
                        "usb backend entry: bus {} addr {} {:04x}:{:04x}",
                        dev.bus_id(),
                        dev.device_address(),
                        dev.vendor_id(),
                        dev.product_id()
                    );
                }
                DeviceDescriptor {
                    vendor_id: dev.vendor_id(),
                    product_id: dev.product_id(),
                    manufacturer: dev.manufacturer_string().map(str::to_string),
                    product: dev.product_string().map(str::to_string),
                    serial_number: dev.serial_number().map(str::to_string),
                }
            })
            .collect();

        info!("Found {} USB device(s)", devices.len());
        Ok(devices)
    }
}
