//! Debounced scroll-active flag

use std::time::{Duration, Instant};

/// Raised on every scroll event, lowered once `settle` passes without one
#[derive(Clone, Debug)]
pub struct ScrollDebouncer {
    settle: Duration,
    last_event: Option<Instant>,
}

impl ScrollDebouncer {
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            last_event: None,
        }
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }

    /// A scroll event arrived; the flag is raised immediately
    pub fn on_scroll(&mut self, now: Instant) {
        self.last_event = Some(now);
    }

    /// Lower the flag if the settle delay has elapsed; returns the flag
    pub fn poll(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_event {
            if now.saturating_duration_since(last) >= self.settle {
                self.last_event = None;
            }
        }
        self.is_scrolling()
    }

    pub fn is_scrolling(&self) -> bool {
        self.last_event.is_some()
    }

    /// When the flag will drop if no further events arrive
    pub fn settles_at(&self) -> Option<Instant> {
        self.last_event.map(|last| last + self.settle)
    }

    pub fn reset(&mut self) {
        self.last_event = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTLE: Duration = Duration::from_millis(100);

    #[test]
    fn test_flag_raised_immediately() {
        let now = Instant::now();
        let mut scroll = ScrollDebouncer::new(SETTLE);
        assert!(!scroll.is_scrolling());
        scroll.on_scroll(now);
        assert!(scroll.is_scrolling());
        assert!(scroll.poll(now));
    }

    #[test]
    fn test_flag_drops_after_settle() {
        let start = Instant::now();
        let mut scroll = ScrollDebouncer::new(SETTLE);
        scroll.on_scroll(start);
        assert!(scroll.poll(start + Duration::from_millis(99)));
        assert!(!scroll.poll(start + SETTLE));
    }

    #[test]
    fn test_further_events_extend_the_freeze() {
        let start = Instant::now();
        let mut scroll = ScrollDebouncer::new(SETTLE);
        scroll.on_scroll(start);
        scroll.on_scroll(start + Duration::from_millis(80));
        assert!(scroll.poll(start + Duration::from_millis(150)));
        assert_eq!(scroll.settles_at(), Some(start + Duration::from_millis(180)));
        assert!(!scroll.poll(start + Duration::from_millis(180)));
    }

    #[test]
    fn test_mobile_settle_is_longer() {
        let start = Instant::now();
        let mut scroll = ScrollDebouncer::new(Duration::from_millis(200));
        scroll.on_scroll(start);
        assert!(scroll.poll(start + Duration::from_millis(150)));
        assert!(!scroll.poll(start + Duration::from_millis(200)));
    }
}
