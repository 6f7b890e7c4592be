//! Time source and rate limiting for event handlers.
//!
//! Handlers never read the wall clock directly. They take a [`Clock`], so
//! tests drive time with a [`ManualClock`] and assert exact boundaries.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Real monotonic clock, origin at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set(&self, at: Duration) {
        self.millis.store(at.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

/// Leading-edge min-interval gate.
///
/// The first event passes; later events pass only once `interval` has
/// elapsed since the last one that passed. Dropped events do not extend
/// the window.
#[derive(Debug, Clone)]
pub struct MinIntervalGate {
    interval: Duration,
    last_admitted: Option<Duration>,
}

impl MinIntervalGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_admitted: None,
        }
    }

    pub fn admit(&mut self, now: Duration) -> bool {
        match self.last_admitted {
            Some(last) if now.saturating_sub(last) < self.interval => false,
            _ => {
                self.last_admitted = Some(now);
                true
            }
        }
    }

    /// Forget the last admitted event so the next one passes.
    pub fn reset(&mut self) {
        self.last_admitted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn gate_admits_first_event() {
        let mut gate = MinIntervalGate::new(ms(16));
        assert!(gate.admit(ms(1000)));
    }

    #[test]
    fn gate_drops_events_inside_interval() {
        let mut gate = MinIntervalGate::new(ms(16));
        assert!(gate.admit(ms(0)));
        assert!(!gate.admit(ms(5)));
        assert!(!gate.admit(ms(15)));
        assert!(gate.admit(ms(16)));
    }

    #[test]
    fn dropped_events_do_not_extend_window() {
        let mut gate = MinIntervalGate::new(ms(16));
        assert!(gate.admit(ms(0)));
        assert!(!gate.admit(ms(10)));
        // 16ms after the admitted event, not after the dropped one
        assert!(gate.admit(ms(17)));
    }

    #[test]
    fn reset_reopens_gate() {
        let mut gate = MinIntervalGate::new(ms(16));
        assert!(gate.admit(ms(0)));
        gate.reset();
        assert!(gate.admit(ms(1)));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(ms(250));
        assert_eq!(clock.now(), ms(250));
        clock.set(ms(10));
        assert_eq!(handle.now(), ms(10));
    }
}
