use std::time::{Duration, Instant};

/// Decides whether enough time has passed since the last save.
///
/// An interval of zero turns autosave off.
#[derive(Debug, Clone)]
pub struct AutosaveGate {
    interval: Duration,
    last_saved: Instant,
}

impl AutosaveGate {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_saved: now,
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs), Instant::now())
    }

    pub fn is_enabled(&self) -> bool {
        !self.interval.is_zero()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.is_enabled() && now.saturating_duration_since(self.last_saved) >= self.interval
    }

    pub fn mark_saved(&mut self, now: Instant) {
        self.last_saved = now;
    }
}
