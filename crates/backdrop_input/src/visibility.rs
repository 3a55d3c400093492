//! Page visibility derived from window events
//!
//! A window counts as hidden while it is occluded or minimized. winit reports
//! minimization on most platforms as a resize to zero.

use winit::dpi::PhysicalSize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityTracker {
    occluded: bool,
    minimized: bool,
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self {
            occluded: false,
            minimized: false,
        }
    }

    /// `WindowEvent::Occluded`; returns the new visibility
    pub fn on_occluded(&mut self, occluded: bool) -> bool {
        self.occluded = occluded;
        self.is_visible()
    }

    /// `WindowEvent::Resized`; returns the new visibility
    pub fn on_resized(&mut self, size: PhysicalSize<u32>) -> bool {
        self.minimized = size.width == 0 || size.height == 0;
        self.is_visible()
    }

    pub fn is_visible(&self) -> bool {
        !self.occluded && !self.minimized
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
