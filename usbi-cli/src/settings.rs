//! Application settings

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use usbi_detect::ScannerConfig;
use usbi_report::ReportConfig;
use usbi_stream::StreamConfig;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Baud rate used when `--baud` is not given
    #[serde(default = "default_baud")]
    pub baud_rate: u32,
    /// Serial read timeout in milliseconds
    #[serde(default = "default_read_timeout")]
    pub read_timeout_ms: u64,
    /// Sleep between polls while no serial input is pending
    #[serde(default = "default_idle_poll")]
    pub idle_poll_ms: u64,
    /// Width of the separator framing detail panels
    #[serde(default = "default_separator_width")]
    pub separator_width: usize,
    /// Hide serial ports whose path contains any of these
    #[serde(default)]
    pub skip_patterns: Vec<String>,
}

fn default_baud() -> u32 {
    115_200
}

fn default_read_timeout() -> u64 {
    1000
}

fn default_idle_poll() -> u64 {
    10
}

fn default_separator_width() -> usize {
    100
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            baud_rate: default_baud(),
            read_timeout_ms: default_read_timeout(),
            idle_poll_ms: default_idle_poll(),
            separator_width: default_separator_width(),
            skip_patterns: Vec::new(),
        }
    }
}

impl Settings {
    /// Get the XDG config directory for usb-inspector
    /// Uses $XDG_CONFIG_HOME/usb-inspector on Linux/macOS, falls back to ~/.config/usb-inspector
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("usb-inspector"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("usb-inspector"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`; a missing or malformed file yields defaults
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("Ignoring malformed settings {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn scanner_config(&self, debug: bool) -> ScannerConfig {
        ScannerConfig {
            debug,
            skip_patterns: self.skip_patterns.clone(),
        }
    }

    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            separator_width: self.separator_width,
        }
    }

    pub fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            idle_poll: Duration::from_millis(self.idle_poll_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.baud_rate, 115_200);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "baud_rate": 9600, "skip_patterns": ["Bluetooth"] }"#).unwrap();

        let settings = Settings::load_from(&path);

        assert_eq!(settings.baud_rate, 9600);
        assert_eq!(settings.read_timeout_ms, 1000);
        assert_eq!(settings.skip_patterns, ["Bluetooth"]);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn stream_config_uses_milliseconds() {
        let settings = Settings {
            read_timeout_ms: 250,
            idle_poll_ms: 5,
            ..Default::default()
        };
        let config = settings.stream_config();

        assert_eq!(config.read_timeout, Duration::from_millis(250));
        assert_eq!(config.idle_poll, Duration::from_millis(5));
    }
}
