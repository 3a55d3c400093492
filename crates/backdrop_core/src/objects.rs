//! Decorative sphere objects: the galaxy core and nebula clouds
//!
//! These only rotate. They have no bounds to leave, so there is no reset
//! logic beyond returning to their initial orientation.

use backdrop_math::{wrap_angle, Euler};

use crate::config::{GalaxyCoreConfig, NebulaConfig};
use crate::gate::FrameTime;

/// Two nested spheres spinning against each other
pub struct GalaxyCore {
    config: GalaxyCoreConfig,
    outer: Euler,
    inner: Euler,
}

impl GalaxyCore {
    pub fn new(config: GalaxyCoreConfig) -> Self {
        Self {
            config,
            outer: Euler::IDENTITY,
            inner: Euler::IDENTITY,
        }
    }

    pub fn config(&self) -> &GalaxyCoreConfig {
        &self.config
    }

    pub fn outer_rotation(&self) -> Euler {
        self.outer
    }

    pub fn inner_rotation(&self) -> Euler {
        self.inner
    }

    pub fn reset(&mut self) {
        self.outer = Euler::IDENTITY;
        self.inner = Euler::IDENTITY;
    }

    pub fn advance(&mut self, time: &FrameTime) {
        let c = &self.config;
        let [inner_y, inner_z] = c.inner_spin_per_tick;
        self.outer.y = wrap_angle(self.outer.y + c.outer_spin_per_tick);
        self.outer.x = (time.elapsed * c.tilt_frequency).sin() * c.tilt_amplitude;
        self.inner.y = wrap_angle(self.inner.y + inner_y);
        self.inner.z = wrap_angle(self.inner.z + inner_z);
    }
}

/// Large faint sphere wobbling slowly; only built on desktop tiers
pub struct NebulaCloud {
    config: NebulaConfig,
    rotation: Euler,
}

impl NebulaCloud {
    pub fn new(config: NebulaConfig) -> Self {
        Self {
            config,
            rotation: Euler::IDENTITY,
        }
    }

    pub fn config(&self) -> &NebulaConfig {
        &self.config
    }

    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    pub fn reset(&mut self) {
        self.rotation = Euler::IDENTITY;
    }

    pub fn advance(&mut self, time: &FrameTime) {
        let [fx, fy] = self.config.wobble_frequency;
        let [ax, ay] = self.config.wobble_amplitude;
        self.rotation.x = (time.elapsed * fx).sin() * ax;
        self.rotation.y = (time.elapsed * fy).sin() * ay;
    }
}
