use std::time::{Duration, Instant};

/// Wall-clock timer for one run
///
/// Each run owns its own handle; nothing is shared between runs.
#[derive(Debug, Clone, Copy)]
pub struct RunTimer {
    started: Instant,
}

impl RunTimer {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since `start`
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
