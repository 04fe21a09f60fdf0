//! Display records
//!
//! A display record is an ordered list of `(field, value)` pairs. Both the
//! table and the JSON renderers consume records, never descriptors directly.

use serde::ser::{Serialize, SerializeMap, Serializer};
use usbi_detect::{DeviceDescriptor, PortDescriptor, UNKNOWN};

/// Ordered mapping of field name to display value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayRecord {
    entries: Vec<(&'static str, String)>,
}

impl DisplayRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; order of insertion is display order
    pub fn push(&mut self, field: &'static str, value: impl Into<String>) {
        self.entries.push((field, value.into()));
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.push(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only the given fields, in the given order
    pub fn select(&self, fields: &[&'static str]) -> DisplayRecord {
        let entries = fields
            .iter()
            .map(|f| (*f, self.get(f).unwrap_or(UNKNOWN).to_string()))
            .collect();
        DisplayRecord { entries }
    }
}

impl Serialize for DisplayRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Anything that can be shown as a display record
pub trait Describe {
    /// All fields, in display order
    fn fields() -> &'static [&'static str];

    /// Compact column set for summary tables
    fn summary_fields() -> &'static [&'static str] {
        Self::fields()
    }

    fn display_record(&self) -> DisplayRecord;
}

/// Hex text of a USB identifier (`0x1234`, `0x1`), without zero padding
pub fn format_id(id: u16) -> String {
    format!("{:#x}", id)
}

fn format_optional_id(id: Option<u16>) -> String {
    id.map(format_id).unwrap_or_else(|| UNKNOWN.to_string())
}

const DEVICE_FIELDS: &[&str] = &["VID", "PID", "Manufacturer", "Product", "Serial"];
const DEVICE_SUMMARY: &[&str] = &["VID", "PID", "Product"];

impl Describe for DeviceDescriptor {
    fn fields() -> &'static [&'static str] {
        DEVICE_FIELDS
    }

    fn summary_fields() -> &'static [&'static str] {
        DEVICE_SUMMARY
    }

    fn display_record(&self) -> DisplayRecord {
        DisplayRecord::new()
            .with("VID", format_id(self.vendor_id))
            .with("PID", format_id(self.product_id))
            .with("Manufacturer", self.manufacturer())
            .with("Product", self.product())
            .with("Serial", self.serial_number())
    }
}

const PORT_FIELDS: &[&str] = &[
    "Name",
    "Device",
    "Description",
    "Manufacturer",
    "HWID",
    "VID",
    "PID",
    "Location",
];

impl Describe for PortDescriptor {
    fn fields() -> &'static [&'static str] {
        PORT_FIELDS
    }

    fn display_record(&self) -> DisplayRecord {
        DisplayRecord::new()
            .with("Name", self.name.as_str())
            .with("Device", self.device_path.as_str())
            .with("Description", self.description())
            .with("Manufacturer", self.manufacturer())
            .with("HWID", self.hardware_id())
            .with("VID", format_optional_id(self.vendor_id))
            .with("PID", format_optional_id(self.product_id))
            .with("Location", self.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usbi_detect::PortKind;

    #[test]
    fn device_record_fields_in_order() {
        let dev = DeviceDescriptor::new(0x1234, 0x0001)
            .with_manufacturer("Acme")
            .with_product("Widget");
        let record = dev.display_record();

        assert_eq!(record.keys().collect::<Vec<_>>(), DEVICE_FIELDS);
        assert_eq!(
            record.values().collect::<Vec<_>>(),
            ["0x1234", "0x1", "Acme", "Widget", "Unknown"]
        );
    }

    #[test]
    fn ids_are_unpadded_lowercase_hex() {
        assert_eq!(format_id(0x0403), "0x403");
        assert_eq!(format_id(0xEA60), "0xea60");
        assert_eq!(format_id(0), "0x0");
    }

    #[test]
    fn port_record_without_usb_info() {
        let record = PortDescriptor::new("/dev/ttyS0").display_record();

        assert_eq!(record.get("Name"), Some("ttyS0"));
        assert_eq!(record.get("Device"), Some("/dev/ttyS0"));
        assert_eq!(record.get("VID"), Some("Unknown"));
        assert_eq!(record.get("HWID"), Some("Unknown"));
        assert_eq!(record.len(), PORT_FIELDS.len());
    }

    #[test]
    fn port_record_with_usb_info() {
        let mut port = PortDescriptor::new("/dev/ttyUSB0");
        port.kind = PortKind::Usb;
        port.vendor_id = Some(0x10C4);
        port.product_id = Some(0xEA60);
        port.description = Some("CP2102 USB to UART Bridge Controller".to_string());

        let record = port.display_record();
        assert_eq!(record.get("VID"), Some("0x10c4"));
        assert_eq!(record.get("PID"), Some("0xea60"));
        assert_eq!(record.get("HWID"), Some("USB VID:PID=10C4:EA60"));
    }

    #[test]
    fn select_keeps_requested_order() {
        let dev = DeviceDescriptor::new(0x1234, 0x0001).with_product("Widget");
        let summary = dev.display_record().select(DEVICE_SUMMARY);

        assert_eq!(
            summary.iter().collect::<Vec<_>>(),
            [("VID", "0x1234"), ("PID", "0x1"), ("Product", "Widget")]
        );
    }
}
