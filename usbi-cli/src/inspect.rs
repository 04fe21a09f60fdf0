//! Interactive per-device USB inspection

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};
use usbi_detect::{DeviceDescriptor, DeviceEnumerator};
use usbi_report::{filter_by_keyword, render_json_one, Reporter};

use crate::console::{is_quit, Console};

/// File name used when exporting one device (`usb_device_1234_0001.json`)
pub fn export_file_name(device: &DeviceDescriptor) -> String {
    format!(
        "usb_device_{:04x}_{:04x}.json",
        device.vendor_id, device.product_id
    )
}

/// Write `device` as JSON into `dir`, returning the written path
pub fn export_device(device: &DeviceDescriptor, dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join(export_file_name(device));
    let json = render_json_one(device)?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Exported device to {}", path.display());
    Ok(path)
}

/// USB menu: list, select, describe, optionally export, repeat
pub struct InspectShell<'a, E> {
    devices: &'a E,
    reporter: &'a Reporter,
    export_dir: PathBuf,
    filter: Option<String>,
}

impl<'a, E: DeviceEnumerator> InspectShell<'a, E> {
    pub fn new(devices: &'a E, reporter: &'a Reporter, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            devices,
            reporter,
            export_dir: export_dir.into(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> anyhow::Result<()> {
        loop {
            let mut devices = self
                .devices
                .list_usb_devices()
                .context("USB enumeration failed")?;
            if let Some(keyword) = &self.filter {
                devices = filter_by_keyword(devices, keyword);
            }

            if devices.is_empty() {
                console.say("\n   >> No USB devices detected.\n")?;
                return Ok(());
            }

            console.say("\n   USB devices available for inspection:\n")?;
            console.say(self.reporter.device_menu(&devices))?;

            let Some(answer) = console.prompt("\n   Choose a device (number, q to quit): ")? else {
                return Ok(());
            };
            if is_quit(&answer) {
                return Ok(());
            }

            let device = match answer.parse::<usize>() {
                Ok(n) if (1..=devices.len()).contains(&n) => &devices[n - 1],
                _ => {
                    console.say(format!("\n   >> Invalid selection '{}'.", answer))?;
                    continue;
                }
            };

            console.say(format!(
                "\n{}",
                self.reporter.details("USB device information", device)
            ))?;

            if console.confirm("\n   >> Export this device to JSON? (y/n): ")? {
                match export_device(device, &self.export_dir) {
                    Ok(path) => console.say(format!("\n   >> Saved to {}", path.display()))?,
                    Err(e) => {
                        warn!("{:#}", e);
                        console.say(format!("\n   >> Export failed: {:#}", e))?;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usbi_detect::DetectError;

    struct FixedDevices(Vec<DeviceDescriptor>);

    impl DeviceEnumerator for FixedDevices {
        fn list_usb_devices(&self) -> Result<Vec<DeviceDescriptor>, DetectError> {
            Ok(self.0.clone())
        }
    }

    fn acme() -> FixedDevices {
        FixedDevices(vec![
            DeviceDescriptor::new(0x1234, 0x0001)
                .with_manufacturer("Acme")
                .with_product("Widget"),
            DeviceDescriptor::new(0x5678, 0x0002)
                .with_manufacturer("Acme")
                .with_product("Gadget"),
        ])
    }

    fn run(devices: &FixedDevices, dir: &Path, input: &str) -> String {
        let reporter = Reporter::default();
        let mut console = Console::new(input.as_bytes(), Vec::new());
        InspectShell::new(devices, &reporter, dir)
            .run(&mut console)
            .unwrap();
        String::from_utf8(console.output).unwrap()
    }

    #[test]
    fn export_name_uses_padded_hex() {
        let dev = DeviceDescriptor::new(0x1234, 0x0001);
        assert_eq!(export_file_name(&dev), "usb_device_1234_0001.json");
    }

    #[test]
    fn export_writes_display_record() {
        let dir = tempfile::tempdir().unwrap();
        let dev = DeviceDescriptor::new(0x5678, 0x0002).with_product("Gadget");

        let path = export_device(&dev, dir.path()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["VID"], "0x5678");
        assert_eq!(json["Product"], "Gadget");
        assert_eq!(json["Serial"], "Unknown");
    }

    #[test]
    fn select_and_export() {
        let dir = tempfile::tempdir().unwrap();

        let output = run(&acme(), dir.path(), "2\ny\nq\n");

        assert!(output.contains("USB device information:"));
        assert!(output.contains("Gadget"));
        assert!(dir.path().join("usb_device_5678_0002.json").exists());
        assert!(!dir.path().join("usb_device_1234_0001.json").exists());
    }

    #[test]
    fn declining_export_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        run(&acme(), dir.path(), "1\nn\nq\n");

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_export_returns_to_menu() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-created");
        let reporter = Reporter::default();
        let mut console = Console::new(&b"1\ny\n2\nn\nq\n"[..], Vec::new());

        let result = InspectShell::new(&acme(), &reporter, &missing).run(&mut console);

        assert!(result.is_ok());
        let output = String::from_utf8(console.output).unwrap();
        assert!(output.contains("Export failed: Failed to write"));
        // the session carried on to the second selection
        assert!(output.contains("Gadget"));
        assert_eq!(output.matches("Choose a device").count(), 3);
        assert!(!missing.exists());
    }

    #[test]
    fn invalid_selection_returns_to_menu() {
        let dir = tempfile::tempdir().unwrap();

        let output = run(&acme(), dir.path(), "7\nwidget\nq\n");

        assert!(output.contains("Invalid selection '7'."));
        assert!(output.contains("Invalid selection 'widget'."));
        assert_eq!(output.matches("Choose a device").count(), 3);
    }

    #[test]
    fn no_devices() {
        let dir = tempfile::tempdir().unwrap();

        let output = run(&FixedDevices(vec![]), dir.path(), "1\n");

        assert!(output.contains("No USB devices detected."));
        assert!(!output.contains("Choose a device"));
    }
}
