//! Event debouncing.
//!
//! Link flaps and notifier storms must not spawn overlapping evaluation
//! batches. The debouncer holds the last accepted fire time and rejects
//! anything inside the minimum gap.

use std::time::Duration;
use tokio::time::Instant;

pub struct Debouncer {
    last_fire: Option<Instant>,
    min_gap: Duration,
}

impl Debouncer {
    pub fn new(min_gap: Duration) -> Self {
        Self {
            last_fire: None,
            min_gap,
        }
    }

    /// Accept or reject an event now.
    pub fn fire(&mut self) -> bool {
        self.fire_at(Instant::now())
    }

    fn fire_at(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_fire {
            if now.duration_since(last) < self.min_gap {
                return false;
            }
        }
        self.last_fire = Some(now);
        true
    }
}
