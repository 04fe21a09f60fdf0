//! Console panels for interactive modes

use usbi_detect::{DeviceDescriptor, PortDescriptor};

use crate::record::{format_id, Describe, DisplayRecord};

/// Width of the label column in detail panels
const LABEL_WIDTH: usize = 15;

/// Reporter configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Length of the separator line framing detail panels
    pub separator_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            separator_width: 100,
        }
    }
}

/// Renders menus and detail panels
#[derive(Debug, Clone)]
pub struct Reporter {
    config: ReportConfig,
}

impl Reporter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn separator(&self) -> String {
        "-".repeat(self.config.separator_width)
    }

    /// Numbered port menu, one line per port, numbering from 1
    pub fn port_menu(&self, ports: &[PortDescriptor]) -> String {
        ports
            .iter()
            .enumerate()
            .map(|(i, port)| format!("   [{}] {}\t{}", i + 1, port.device_path, port.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Numbered USB device menu, one line per device, numbering from 1
    pub fn device_menu(&self, devices: &[DeviceDescriptor]) -> String {
        devices
            .iter()
            .enumerate()
            .map(|(i, dev)| {
                format!(
                    "   [{}] {}:{}  {}",
                    i + 1,
                    format_id(dev.vendor_id),
                    format_id(dev.product_id),
                    dev.product()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Framed panel listing every field of `item`
    pub fn details<D: Describe>(&self, title: &str, item: &D) -> String {
        self.panel(title, &item.display_record())
    }

    fn panel(&self, title: &str, record: &DisplayRecord) -> String {
        let separator = self.separator();
        let mut out = String::new();
        out.push_str(&separator);
        out.push('\n');
        out.push_str(&format!("   {}:\n", title));
        for (field, value) in record.iter() {
            let label = format!("{}:", field);
            out.push_str(&format!("   {:<width$}{}\n", label, value, width = LABEL_WIDTH));
        }
        out.push_str(&separator);
        out
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_uses_configured_width() {
        let reporter = Reporter::new(ReportConfig { separator_width: 8 });
        assert_eq!(reporter.separator(), "--------");
    }

    #[test]
    fn port_menu_numbers_from_one() {
        let mut first = PortDescriptor::new("/dev/ttyUSB0");
        first.description = Some("FT232R".to_string());
        let second = PortDescriptor::new("/dev/ttyS0");

        let menu = Reporter::default().port_menu(&[first, second]);
        assert_eq!(
            menu,
            "   [1] /dev/ttyUSB0\tFT232R\n   [2] /dev/ttyS0\tUnknown"
        );
    }

    #[test]
    fn device_menu_shows_ids_and_product() {
        let devices = vec![
            DeviceDescriptor::new(0x1234, 0x0001).with_product("Widget"),
            DeviceDescriptor::new(0x5678, 0x0002),
        ];

        let menu = Reporter::default().device_menu(&devices);
        assert_eq!(
            menu,
            "   [1] 0x1234:0x1  Widget\n   [2] 0x5678:0x2  Unknown"
        );
    }

    #[test]
    fn details_panel_is_framed() {
        let reporter = Reporter::new(ReportConfig { separator_width: 4 });
        let dev = DeviceDescriptor::new(0x1234, 0x0001).with_product("Widget");

        let panel = reporter.details("Device information", &dev);
        let lines: Vec<_> = panel.lines().collect();

        assert_eq!(lines.first(), Some(&"----"));
        assert_eq!(lines.last(), Some(&"----"));
        assert_eq!(lines[1], "   Device information:");
        assert_eq!(lines[2], "   VID:           0x1234");
        assert_eq!(lines[5], "   Product:       Widget");
    }
}
