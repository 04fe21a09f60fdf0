use std::path::PathBuf;

use usbi_report::View;

#[derive(Debug, clap::Parser)]
#[command(name = "usb-inspector", version, about = "USB Inspector CLI Tool", long_about = None)]
pub struct Cli {
    /// Show full USB device info
    #[arg(long)]
    pub allinfo: bool,

    /// Filter results by keyword (case-insensitive)
    #[arg(long, value_name = "KEYWORD")]
    pub filter: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Save output to file (overwrites it)
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Enter serial port inspector mode
    #[arg(long, conflicts_with = "inspect")]
    pub serial: bool,

    /// Inspect USB devices one at a time, with optional JSON export
    #[arg(long)]
    pub inspect: bool,

    /// Baud rate for serial streaming (defaults to the configured rate)
    #[arg(long, value_name = "RATE")]
    pub baud: Option<u32>,

    /// Verbose logging, including enumeration backend details
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub fn view(&self) -> View {
        if self.allinfo {
            View::Full
        } else {
            View::Summary
        }
    }
}
