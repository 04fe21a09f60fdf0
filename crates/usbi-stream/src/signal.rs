//! Stop signal shared between the stream loop and an interrupt handler

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable stop flag, checked once per loop iteration
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the stream loop to stop
    pub fn trigger(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Clear the flag before starting a new session
    pub fn reset(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let stop = StopSignal::new();
        let handler_side = stop.clone();

        assert!(!stop.is_triggered());
        handler_side.trigger();
        assert!(stop.is_triggered());

        stop.reset();
        assert!(!handler_side.is_triggered());
    }
}
