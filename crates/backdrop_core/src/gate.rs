//! Frame gate and per-system frame counters
//!
//! Evaluated once per display frame:
//! 1. page hidden: the loop is suspended and no tick is dispatched at all
//! 2. scrolling (or reduced motion): every system is frozen for the tick
//! 3. otherwise each system advances only when its own counter wraps

use bitflags::bitflags;

/// Time handed to systems on a gated tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds of unfrozen animation since mount
    pub elapsed: f32,
    /// Seconds since the previous dispatched tick
    pub dt: f32,
}

/// Outcome of evaluating the gate for one display frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Page hidden: no tick, no redraw
    Suspended,
    /// Scrolling or reduced motion: redraw the last state, mutate nothing
    Frozen,
    /// Systems may advance, subject to their divisors
    Run,
}

/// Page-level flags consulted once per frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGate {
    scrolling: bool,
    visible: bool,
    reduced_motion: bool,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameGate {
    pub fn new() -> Self {
        Self {
            scrolling: false,
            visible: true,
            reduced_motion: false,
        }
    }

    /// Builder: start with reduced motion enabled
    pub fn with_reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }

    pub fn set_scrolling(&mut self, scrolling: bool) {
        if self.scrolling != scrolling {
            log::debug!("Scroll freeze {}", if scrolling { "engaged" } else { "released" });
        }
        self.scrolling = scrolling;
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            log::debug!("Page {}", if visible { "visible, resuming" } else { "hidden, suspending" });
        }
        self.visible = visible;
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn evaluate(&self) -> GateDecision {
        if !self.visible {
            GateDecision::Suspended
        } else if self.scrolling || self.reduced_motion {
            GateDecision::Frozen
        } else {
            GateDecision::Run
        }
    }

    /// Back to the mount defaults (visible, not scrolling)
    pub fn reset(&mut self) {
        self.scrolling = false;
        self.visible = true;
    }
}

/// Counts running ticks modulo a divisor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCounter {
    count: u32,
    divisor: u32,
}

impl FrameCounter {
    /// A divisor of 0 is treated as 1
    pub fn new(divisor: u32) -> Self {
        Self {
            count: 0,
            divisor: divisor.max(1),
        }
    }

    /// Count one running tick; true when the system is due to advance
    pub fn tick(&mut self) -> bool {
        self.count = (self.count + 1) % self.divisor;
        self.count == 0
    }

    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

bitflags! {
    /// Which scheduled systems advanced on a tick
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SystemMask: u16 {
        const BACKGROUND_STARS = 1 << 0;
        const STAR_FIELD = 1 << 1;
        const STAR_SHOWER = 1 << 2;
        const GALACTIC_DUST = 1 << 3;
        const FLOATING_ORBS = 1 << 4;
        const GALAXY_CORE = 1 << 5;
        const NEBULAE = 1 << 6;
        const CAMERA = 1 << 7;
    }
}

/// What a dispatched tick did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub advanced: SystemMask,
}

impl TickReport {
    /// True when any particle buffer changed and needs re-uploading
    pub fn buffers_dirty(&self) -> bool {
        self.advanced.intersects(SystemMask::STAR_SHOWER | SystemMask::FLOATING_ORBS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_defaults_to_run() {
        assert_eq!(FrameGate::new().evaluate(), GateDecision::Run);
    }

    #[test]
    fn test_hidden_beats_scrolling() {
        let mut gate = FrameGate::new();
        gate.set_scrolling(true);
        gate.set_visible(false);
        assert_eq!(gate.evaluate(), GateDecision::Suspended);
        gate.set_visible(true);
        assert_eq!(gate.evaluate(), GateDecision::Frozen);
        gate.set_scrolling(false);
        assert_eq!(gate.evaluate(), GateDecision::Run);
    }

    #[test]
    fn test_reduced_motion_freezes() {
        let gate = FrameGate::new().with_reduced_motion(true);
        assert_eq!(gate.evaluate(), GateDecision::Frozen);
    }

    #[test]
    fn test_reset_restores_defaults_but_keeps_reduced_motion() {
        let mut gate = FrameGate::new().with_reduced_motion(true);
        gate.set_visible(false);
        gate.set_scrolling(true);
        gate.reset();
        assert!(gate.is_visible());
        assert!(!gate.is_scrolling());
        assert!(gate.reduced_motion());
    }

    #[test]
    fn test_divisor_one_fires_every_tick() {
        let mut counter = FrameCounter::new(1);
        assert!((0..10).all(|_| counter.tick()));
    }

    #[test]
    fn test_divisor_three_fires_every_third_tick() {
        let mut counter = FrameCounter::new(3);
        let fired: Vec<bool> = (0..9).map(|_| counter.tick()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, false, false, true]);
        assert!(counter.count() < counter.divisor());
    }

    #[test]
    fn test_zero_divisor_is_clamped() {
        let mut counter = FrameCounter::new(0);
        assert_eq!(counter.divisor(), 1);
        assert!(counter.tick());
    }

    #[test]
    fn test_buffers_dirty_only_for_moving_points() {
        let spin_only = TickReport { advanced: SystemMask::STAR_FIELD | SystemMask::CAMERA };
        assert!(!spin_only.buffers_dirty());
        let shower = TickReport { advanced: SystemMask::STAR_SHOWER };
        assert!(shower.buffers_dirty());
    }
}
