//! Ctrl+C handling for serial mode
//!
//! While a stream is armed, Ctrl+C triggers the shared [`StopSignal`] and the
//! stream loop winds down on its next check. Outside a stream, Ctrl+C ends the
//! process with status 130 as a terminal user expects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::Runtime;
use tracing::{debug, warn};
use usbi_stream::StopSignal;

/// Exit status for termination by SIGINT
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Installed Ctrl+C handler
pub struct Interrupts {
    stop: StopSignal,
    armed: Arc<AtomicBool>,
    // keeps the handler task alive
    _runtime: Runtime,
}

impl Interrupts {
    /// Start listening for Ctrl+C
    pub fn install() -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("ctrl-c")
            .enable_all()
            .build()
            .context("Failed to start the interrupt handler runtime")?;

        let stop = StopSignal::new();
        let armed = Arc::new(AtomicBool::new(false));

        let task_stop = stop.clone();
        let task_armed = armed.clone();
        runtime.spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Ctrl+C handler unavailable: {}", e);
                    return;
                }
                if task_armed.load(Ordering::SeqCst) {
                    debug!("Ctrl+C: stopping stream");
                    task_stop.trigger();
                } else {
                    // stdout may be locked by a blocked prompt, so exit without printing
                    std::process::exit(INTERRUPTED_EXIT_CODE);
                }
            }
        });

        Ok(Self {
            stop,
            armed,
            _runtime: runtime,
        })
    }

    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }

    /// Route Ctrl+C to the stop signal until the guard is dropped
    pub fn arm(&self) -> ArmedGuard<'_> {
        self.stop.reset();
        self.armed.store(true, Ordering::SeqCst);
        ArmedGuard { armed: &self.armed }
    }
}

/// Disarms the stream route on drop
pub struct ArmedGuard<'a> {
    armed: &'a AtomicBool,
}

impl Drop for ArmedGuard<'_> {
    fn drop(&mut self) {
        self.armed.store(false, Ordering::SeqCst);
    }
}
