//! One-shot USB device listing (table or JSON)

use std::io::Write;

use anyhow::Context;
use tracing::info;
use usbi_detect::DeviceEnumerator;
use usbi_report::{filter_by_keyword, render_json, render_table};

use crate::cli::Cli;

/// Enumerate, filter and render USB devices as `cli` asks.
///
/// The rendered text goes to `out`; with `--save` it is also written to the
/// given path, replacing any existing file.
pub fn run_listing<E: DeviceEnumerator, W: Write>(
    cli: &Cli,
    devices: &E,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "USB Inspector (v{})", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "Scanning USB devices...\n")?;

    let mut found = devices
        .list_usb_devices()
        .context("USB enumeration failed")?;
    if let Some(keyword) = &cli.filter {
        found = filter_by_keyword(found, keyword);
        info!("{} device(s) match '{}'", found.len(), keyword);
    }

    let rendered = if cli.json {
        render_json(&found)?
    } else {
        render_table(&found, cli.view())
    };
    writeln!(out, "{}", rendered)?;
    if found.is_empty() {
        writeln!(out, "\nNo USB devices detected.")?;
    }

    if let Some(path) = &cli.save {
        std::fs::write(path, &rendered)
            .with_context(|| format!("Failed to save output to {}", path.display()))?;
        writeln!(out, "\nOutput saved to {}", path.display())?;
    }
    Ok(())
}
