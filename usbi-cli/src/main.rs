//! USB Inspector
//!
//! Lists USB devices as a table or JSON, inspects them one by one, and reads
//! live line output from serial ports.

mod cli;
mod console;
mod inspect;
mod interrupt;
mod listing;
mod logging;
mod serial;
mod settings;

use std::io;

use clap::{CommandFactory, Parser};
use usbi_detect::{PortScanner, UsbScanner};
use usbi_report::Reporter;
use usbi_stream::StreamReader;

use cli::Cli;
use console::Console;
use inspect::InspectShell;
use interrupt::Interrupts;
use serial::{ConsoleStreamer, SerialShell};
use settings::Settings;

fn main() -> anyhow::Result<()> {
    // No flags at all: show usage instead of doing a default listing
    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        return Ok(());
    }

    let cli = Cli::parse();
    logging::init(cli.debug);

    let settings = Settings::load();
    tracing::debug!("Settings: {:?}", settings);
    let reporter = Reporter::new(settings.report_config());

    if cli.serial {
        let ports = PortScanner::with_config(settings.scanner_config(cli.debug));
        let streamer = ConsoleStreamer::new(
            StreamReader::new(settings.stream_config()),
            Interrupts::install()?,
        );
        let baud_rate = cli.baud.unwrap_or(settings.baud_rate);

        let stdin = io::stdin();
        let mut console = Console::new(stdin.lock(), io::stdout().lock());
        SerialShell::new(&ports, &reporter, streamer, baud_rate)
            .with_filter(cli.filter.clone())
            .run(&mut console)
    } else if cli.inspect {
        let devices = UsbScanner::with_config(settings.scanner_config(cli.debug));
        let export_dir = std::env::current_dir()?;

        let stdin = io::stdin();
        let mut console = Console::new(stdin.lock(), io::stdout().lock());
        InspectShell::new(&devices, &reporter, export_dir)
            .with_filter(cli.filter.clone())
            .run(&mut console)
    } else {
        let devices = UsbScanner::with_config(settings.scanner_config(cli.debug));
        listing::run_listing(&cli, &devices, &mut io::stdout().lock())
    }
}
