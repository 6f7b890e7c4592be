//! Auto-advancing slideshow (hero images, review cards).
//!
//! Time comes from an injected [`Clock`]; the host calls
//! [`Slideshow::tick`] from its timer and gets back the slide to show when
//! the interval has elapsed. Manual navigation restarts the interval.

use crate::config::SlideshowConfig;
use crate::navigation::wrap_index;
use crate::throttle::Clock;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Slideshow<C> {
    clock: C,
    count: usize,
    index: usize,
    interval: Duration,
    autoplay: bool,
    next_at: Duration,
}

impl<C: Clock> Slideshow<C> {
    pub fn new(count: usize, config: &SlideshowConfig, clock: C) -> Self {
        let interval = config.interval();
        let next_at = clock.now() + interval;
        Self {
            clock,
            count,
            index: 0,
            interval,
            autoplay: config.autoplay,
            next_at,
        }
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Advance if the interval has elapsed. Returns the new slide, if any.
    ///
    /// A host that was suspended for several intervals advances one slide,
    /// not one per missed interval.
    pub fn tick(&mut self) -> Option<usize> {
        if !self.autoplay || self.count < 2 {
            return None;
        }
        let now = self.clock.now();
        if now < self.next_at {
            return None;
        }
        self.step(1);
        Some(self.index)
    }

    pub fn next(&mut self) -> usize {
        self.step(1);
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.step(-1);
        self.index
    }

    /// Jump to `index` (wrapped).
    pub fn show(&mut self, index: isize) -> usize {
        if let Some(i) = wrap_index(index, self.count) {
            self.index = i;
        }
        self.restart();
        self.index
    }

    pub fn pause(&mut self) {
        self.autoplay = false;
    }

    pub fn resume(&mut self) {
        self.autoplay = true;
        self.restart();
    }

    fn step(&mut self, delta: isize) {
        if let Some(i) = wrap_index(self.index as isize + delta, self.count) {
            self.index = i;
        }
        self.restart();
    }

    fn restart(&mut self) {
        self.next_at = self.clock.now() + self.interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::throttle::ManualClock;

    fn slideshow(count: usize) -> (Slideshow<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (Slideshow::new(count, &SlideshowConfig::default(), clock.clone()), clock)
    }

    fn secs(v: u64) -> Duration {
        Duration::from_secs(v)
    }

    #[test]
    fn advances_once_per_interval() {
        let (mut s, clock) = slideshow(3);
        clock.advance(secs(9));
        assert_eq!(s.tick(), None);
        clock.advance(secs(1));
        assert_eq!(s.tick(), Some(1));
        assert_eq!(s.tick(), None);
        clock.advance(secs(10));
        assert_eq!(s.tick(), Some(2));
        clock.advance(secs(10));
        assert_eq!(s.tick(), Some(0));
    }

    #[test]
    fn missed_intervals_advance_one_slide() {
        let (mut s, clock) = slideshow(5);
        clock.advance(secs(45));
        assert_eq!(s.tick(), Some(1));
        assert_eq!(s.tick(), None);
    }

    #[test]
    fn manual_navigation_restarts_interval() {
        let (mut s, clock) = slideshow(4);
        clock.advance(secs(8));
        assert_eq!(s.prev(), 3);
        clock.advance(secs(5));
        assert_eq!(s.tick(), None);
        clock.advance(secs(5));
        assert_eq!(s.tick(), Some(0));
        assert_eq!(s.show(-2), 2);
    }

    #[test]
    fn paused_or_single_slide_never_advances() {
        let (mut s, clock) = slideshow(1);
        clock.advance(secs(60));
        assert_eq!(s.tick(), None);

        let (mut s, clock) = slideshow(3);
        s.pause();
        clock.advance(secs(60));
        assert_eq!(s.tick(), None);
        s.resume();
        clock.advance(secs(10));
        assert_eq!(s.tick(), Some(1));
    }

    #[test]
    fn autoplay_off_in_config() {
        let clock = ManualClock::new();
        let config = SlideshowConfig {
            autoplay: false,
            ..Default::default()
        };
        let mut s = Slideshow::new(3, &config, clock.clone());
        clock.advance(secs(60));
        assert_eq!(s.tick(), None);
        assert_eq!(s.next(), 1);
    }

    #[test]
    fn empty_slideshow_stays_at_zero() {
        let (mut s, _) = slideshow(0);
        assert!(s.is_empty());
        assert_eq!(s.next(), 0);
        assert_eq!(s.show(5), 0);
    }
}
