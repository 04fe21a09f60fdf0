//! Interactive serial port mode

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, info};
use usbi_detect::{find_port, PortDescriptor, PortEnumerator};
use usbi_report::{filter_by_keyword, Reporter};
use usbi_stream::{StreamOutcome, StreamReader, StreamReport};

use crate::console::{is_quit, Console};
use crate::interrupt::Interrupts;

/// Runs one live stream session, writing lines to `out`
pub trait LineStreamer {
    fn stream(&mut self, port_path: &str, baud_rate: u32, out: &mut dyn Write) -> StreamReport;
}

/// Streams a real serial port to the console, stoppable with Ctrl+C
pub struct ConsoleStreamer {
    reader: StreamReader,
    interrupts: Interrupts,
}

impl ConsoleStreamer {
    pub fn new(reader: StreamReader, interrupts: Interrupts) -> Self {
        Self { reader, interrupts }
    }
}

impl LineStreamer for ConsoleStreamer {
    fn stream(&mut self, port_path: &str, baud_rate: u32, out: &mut dyn Write) -> StreamReport {
        let _armed = self.interrupts.arm();
        self.reader
            .stream_lines(port_path, baud_rate, self.interrupts.stop_signal(), |line| {
                writeln!(out, "{}", line)?;
                out.flush()
            })
    }
}

/// Turn a menu answer into a device path.
///
/// A number from 1 to `ports.len()` picks that port; anything else is taken
/// as a literal path.
pub fn resolve_selection(ports: &[PortDescriptor], answer: &str) -> String {
    match answer.parse::<usize>() {
        Ok(n) if (1..=ports.len()).contains(&n) => ports[n - 1].device_path.clone(),
        _ => answer.to_string(),
    }
}

/// Serial menu: list, select, describe, optionally stream, repeat
pub struct SerialShell<'a, P, S> {
    ports: &'a P,
    reporter: &'a Reporter,
    streamer: S,
    baud_rate: u32,
    filter: Option<String>,
}

impl<'a, P: PortEnumerator, S: LineStreamer> SerialShell<'a, P, S> {
    pub fn new(ports: &'a P, reporter: &'a Reporter, streamer: S, baud_rate: u32) -> Self {
        Self {
            ports,
            reporter,
            streamer,
            baud_rate,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> anyhow::Result<()> {
        loop {
            let mut ports = self
                .ports
                .list_ports()
                .context("Serial port enumeration failed")?;
            if let Some(keyword) = &self.filter {
                ports = filter_by_keyword(ports, keyword);
            }

            if ports.is_empty() {
                console.say("\n   >> No serial devices detected.\n")?;
                return Ok(());
            }

            console.say("\n   Ports available for inspection:\n")?;
            console.say(self.reporter.port_menu(&ports))?;

            let Some(answer) = console.prompt("\n   Choose a port (number or name, q to quit): ")?
            else {
                return Ok(());
            };
            if is_quit(&answer) {
                return Ok(());
            }
            if answer.is_empty() {
                continue;
            }

            let selected = resolve_selection(&ports, &answer);
            let port = match find_port(&ports, &selected) {
                Ok(port) => port,
                Err(e) => {
                    debug!("{}", e);
                    console.say(format!("\n   >> Port '{}' not found.", selected))?;
                    continue;
                }
            };

            console.say(format!(
                "\n{}",
                self.reporter.details("Device information", port)
            ))?;

            if console.confirm("\n   >> Read data from this port? (y/n): ")? {
                self.stream(console, &selected)?;
            }
        }
    }

    fn stream<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        port_path: &str,
    ) -> anyhow::Result<()> {
        console.say(format!(
            "\nListening to {} at {} baud...\n",
            port_path, self.baud_rate
        ))?;
        console.say("Press Ctrl+C to stop.\n")?;

        let report = self
            .streamer
            .stream(port_path, self.baud_rate, &mut console.output);
        info!("{} line(s) received from {}", report.lines, port_path);

        match report.outcome {
            StreamOutcome::Stopped => console.say(format!("\n{}", report.outcome))?,
            _ => console.say(format!("   >> {}", report.outcome))?,
        }
        Ok(())
    }
}
