//! Normalized pointer position and the throttle that feeds it
//!
//! Raw cursor events arrive far more often than the camera needs them. The
//! throttle holds the latest sample and only commits it once per interval,
//! so the camera reads a value that changes at a bounded rate.

use std::time::{Duration, Instant};

use winit::dpi::{PhysicalPosition, PhysicalSize};

/// Pointer position with each axis in `[-1, 1]`, origin at the window centre
///
/// `y` grows downward, matching window coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    /// Clamp both axes into `[-1, 1]`
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }

    /// Normalize a pixel position against the window size
    ///
    /// Returns `None` for NaN input. A zero-sized window maps to the centre.
    pub fn normalize(px: f64, py: f64, width: u32, height: u32) -> Option<Self> {
        if px.is_nan() || py.is_nan() {
            return None;
        }
        if width == 0 || height == 0 {
            return Some(Self::CENTER);
        }
        let x = (px / width as f64 - 0.5) * 2.0;
        let y = (py / height as f64 - 0.5) * 2.0;
        Some(Self::new(x as f32, y as f32))
    }

    /// Normalize a winit cursor position against the inner window size
    pub fn from_cursor(position: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> Option<Self> {
        Self::normalize(position.x, position.y, size.width, size.height)
    }
}

/// Trailing-edge throttle for pointer samples
///
/// The first sample after an idle period opens a window of `interval`. Later
/// samples inside the window replace the pending one. When the window has
/// closed, the next [`poll`](Self::poll) commits the latest pending sample.
#[derive(Clone, Debug)]
pub struct PointerThrottle {
    interval: Duration,
    deadline: Option<Instant>,
    pending: Option<PointerState>,
    committed: PointerState,
}

impl PointerThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
            pending: None,
            committed: PointerState::CENTER,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record a raw sample at `now`
    pub fn on_sample(&mut self, sample: PointerState, now: Instant) {
        self.pending = Some(sample);
        if self.deadline.is_none() {
            self.deadline = Some(now + self.interval);
        }
    }

    /// Commit the pending sample if its window has closed
    ///
    /// Returns true when the committed state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                match self.pending.take() {
                    Some(sample) if sample != self.committed => {
                        self.committed = sample;
                        true
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Last committed sample; what the camera reads
    pub fn current(&self) -> PointerState {
        self.committed
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop anything pending and return to the centre
    pub fn reset(&mut self) {
        self.deadline = None;
        self.pending = None;
        self.committed = PointerState::CENTER;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_normalize_corners_and_centre() {
        assert_eq!(PointerState::normalize(0.0, 0.0, 800, 600), Some(PointerState::new(-1.0, -1.0)));
        assert_eq!(PointerState::normalize(400.0, 300.0, 800, 600), Some(PointerState::CENTER));
        assert_eq!(PointerState::normalize(800.0, 600.0, 800, 600), Some(PointerState::new(1.0, 1.0)));
    }

    #[test]
    fn test_normalize_clamps_outside_window() {
        let p = PointerState::normalize(-500.0, 5000.0, 800, 600).unwrap();
        assert_eq!(p, PointerState::new(-1.0, 1.0));
    }

    #[test]
    fn test_normalize_rejects_nan_and_handles_empty_window() {
        assert_eq!(PointerState::normalize(f64::NAN, 10.0, 800, 600), None);
        assert_eq!(PointerState::normalize(10.0, 10.0, 0, 600), Some(PointerState::CENTER));
    }

    #[test]
    fn test_from_cursor_uses_inner_size() {
        let p = PointerState::from_cursor(PhysicalPosition::new(600.0, 150.0), PhysicalSize::new(800, 600)).unwrap();
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_throttle_commits_latest_sample_when_window_closes() {
        let start = Instant::now();
        let mut throttle = PointerThrottle::new(INTERVAL);

        throttle.on_sample(PointerState::new(0.1, 0.1), start);
        throttle.on_sample(PointerState::new(0.2, 0.2), start + Duration::from_millis(30));
        throttle.on_sample(PointerState::new(0.3, -0.3), start + Duration::from_millis(60));

        assert!(!throttle.poll(start + Duration::from_millis(99)));
        assert_eq!(throttle.current(), PointerState::CENTER);

        assert!(throttle.poll(start + INTERVAL));
        assert_eq!(throttle.current(), PointerState::new(0.3, -0.3));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn test_throttle_opens_new_window_after_idle() {
        let start = Instant::now();
        let mut throttle = PointerThrottle::new(INTERVAL);
        throttle.on_sample(PointerState::new(0.5, 0.0), start);
        throttle.poll(start + INTERVAL);

        let later = start + Duration::from_secs(2);
        throttle.on_sample(PointerState::new(-0.5, 0.0), later);
        assert!(!throttle.poll(later + Duration::from_millis(50)));
        assert_eq!(throttle.current(), PointerState::new(0.5, 0.0));
        assert!(throttle.poll(later + INTERVAL));
        assert_eq!(throttle.current(), PointerState::new(-0.5, 0.0));
    }

    #[test]
    fn test_at_most_one_commit_per_interval() {
        let start = Instant::now();
        let mut throttle = PointerThrottle::new(INTERVAL);
        let mut commits = 0;
        // A sample every 5 ms for one second, polled just as often
        for step in 0..200u64 {
            let now = start + Duration::from_millis(step * 5);
            throttle.on_sample(PointerState::new((step as f32 * 0.01).sin(), 0.0), now);
            if throttle.poll(now) {
                commits += 1;
            }
        }
        assert!(commits <= 10, "{} commits", commits);
        assert!(commits >= 9);
    }

    #[test]
    fn test_reset_returns_to_centre() {
        let start = Instant::now();
        let mut throttle = PointerThrottle::new(INTERVAL);
        throttle.on_sample(PointerState::new(1.0, 1.0), start);
        throttle.poll(start + INTERVAL);
        throttle.on_sample(PointerState::new(0.2, 0.2), start + INTERVAL);
        throttle.reset();
        assert_eq!(throttle.current(), PointerState::CENTER);
        assert!(!throttle.poll(start + INTERVAL * 5));
    }
}
