//! Device capability resolution
//!
//! A [`DeviceProfile`] is computed once from the viewport size and the
//! reported logical core count, then passed down explicitly. Nothing in the
//! update path reads window or hardware state on its own.

use serde::{Serialize, Deserialize};

/// Logical viewport size in CSS-style pixels (before any DPI scaling)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height, falling back to 1.0 for a degenerate viewport
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Breakpoints used to classify a device
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Viewports at or below this width are treated as mobile
    pub mobile_breakpoint: u32,
    /// Devices reporting at most this many logical cores are low-end
    pub low_end_cores: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768,
            low_end_cores: 4,
        }
    }
}

/// Capability class driving every quality/quantity tradeoff
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceTier {
    Desktop,
    DesktopLowEnd,
    Mobile,
    MobileLowEnd,
}

impl DeviceTier {
    pub fn is_mobile(self) -> bool {
        matches!(self, DeviceTier::Mobile | DeviceTier::MobileLowEnd)
    }

    pub fn is_low_end(self) -> bool {
        matches!(self, DeviceTier::DesktopLowEnd | DeviceTier::MobileLowEnd)
    }
}

impl std::fmt::Display for DeviceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeviceTier::Desktop => "desktop",
            DeviceTier::DesktopLowEnd => "desktop (low-end)",
            DeviceTier::Mobile => "mobile",
            DeviceTier::MobileLowEnd => "mobile (low-end)",
        };
        f.write_str(name)
    }
}

/// Resolved device capabilities, immutable for the lifetime of a mount
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub is_mobile: bool,
    pub is_low_end: bool,
    pub viewport: Viewport,
}

impl DeviceProfile {
    /// Resolve with the default breakpoints
    pub fn resolve(viewport: Viewport, concurrency: u32) -> Self {
        Self::resolve_with(&TierThresholds::default(), viewport, concurrency)
    }

    /// Resolve with explicit breakpoints
    ///
    /// A concurrency hint of 0 means the platform did not report one and is
    /// treated as low-end.
    pub fn resolve_with(thresholds: &TierThresholds, viewport: Viewport, concurrency: u32) -> Self {
        Self {
            is_mobile: viewport.width <= thresholds.mobile_breakpoint,
            is_low_end: concurrency <= thresholds.low_end_cores,
            viewport,
        }
    }

    pub fn tier(&self) -> DeviceTier {
        match (self.is_mobile, self.is_low_end) {
            (false, false) => DeviceTier::Desktop,
            (false, true) => DeviceTier::DesktopLowEnd,
            (true, false) => DeviceTier::Mobile,
            (true, true) => DeviceTier::MobileLowEnd,
        }
    }
}
