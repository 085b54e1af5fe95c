use std::time::Duration;
use tokio::time::Instant;

/// Cadence tracker for one activity of the multi-rate loop.
///
/// A fresh schedule reports due immediately, so every activity runs on the
/// first tick after startup. `mark_run` stores the tick's `now`, not
/// `last_run + interval`: a loop that stalls past several intervals fires
/// once and drifts forward instead of catching up.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    interval: Duration,
    last_run: Option<Instant>,
}

impl Schedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_run {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        }
    }

    pub fn mark_run(&mut self, now: Instant) {
        self.last_run = Some(now);
    }
}
