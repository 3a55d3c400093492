//! Spherical shell of stars under a single rigid transform

use std::f32::consts::{PI, TAU};

use backdrop_math::{wrap_angle, Euler, Vec3};
use rand::Rng;

use super::ParticleBuffer;
use crate::config::{StarDistribution, StarFieldConfig};
use crate::gate::FrameTime;

/// Static point cloud; only its orientation changes between ticks
pub struct StarField {
    config: StarFieldConfig,
    positions: ParticleBuffer,
    rotation: Euler,
}

impl StarField {
    pub fn new<R: Rng + ?Sized>(config: StarFieldConfig, rng: &mut R) -> Self {
        let mut field = Self {
            positions: ParticleBuffer::new(config.count),
            config,
            rotation: Euler::IDENTITY,
        };
        field.reset(rng);
        field
    }

    pub fn config(&self) -> &StarFieldConfig {
        &self.config
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.positions
    }

    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    /// Scatter every star over the shell again and clear the orientation
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in 0..self.positions.count() {
            let position = sample_shell(&self.config, rng);
            self.positions.set(i, position);
        }
        self.rotation = Euler::IDENTITY;
    }

    /// X tilt follows a bounded sinusoid of elapsed time; Y spin accumulates
    pub fn advance(&mut self, time: &FrameTime) {
        self.rotation.x = (time.elapsed * self.config.tilt_frequency).sin() * self.config.tilt_amplitude;
        self.rotation.y = wrap_angle(self.rotation.y + self.config.spin_per_tick);
    }
}

fn sample_shell<R: Rng + ?Sized>(config: &StarFieldConfig, rng: &mut R) -> Vec3 {
    let radius = config.radius.sample(rng);
    let theta = rng.random::<f32>() * TAU;
    let phi = match config.distribution {
        StarDistribution::Parametric => rng.random::<f32>() * PI,
        StarDistribution::AreaUniform => (1.0 - 2.0 * rng.random::<f32>()).clamp(-1.0, 1.0).acos(),
    };

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}
