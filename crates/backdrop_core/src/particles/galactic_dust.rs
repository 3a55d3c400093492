//! Flat ring of dust turning slowly about the vertical axis

use std::f32::consts::TAU;

use backdrop_math::{wrap_angle, Euler, Vec3};
use rand::Rng;

use super::ParticleBuffer;
use crate::config::GalacticDustConfig;

pub struct GalacticDust {
    config: GalacticDustConfig,
    positions: ParticleBuffer,
    rotation: Euler,
}

impl GalacticDust {
    pub fn new<R: Rng + ?Sized>(config: GalacticDustConfig, rng: &mut R) -> Self {
        let mut dust = Self {
            positions: ParticleBuffer::new(config.count),
            config,
            rotation: Euler::IDENTITY,
        };
        dust.reset(rng);
        dust
    }

    pub fn config(&self) -> &GalacticDustConfig {
        &self.config
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.positions
    }

    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in 0..self.positions.count() {
            let radius = self.config.radius.sample(rng);
            let angle = rng.random::<f32>() * TAU;
            let y = (rng.random::<f32>() - 0.5) * self.config.thickness;
            self.positions.set(i, Vec3::new(angle.cos() * radius, y, angle.sin() * radius));
        }
        self.rotation = Euler::IDENTITY;
    }

    pub fn advance(&mut self) {
        self.rotation.y = wrap_angle(self.rotation.y + self.config.spin_per_tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::device::{DeviceProfile, Viewport};
    use rand::{rngs::StdRng, SeedableRng};

    fn config() -> GalacticDustConfig {
        SceneConfig::for_profile(&DeviceProfile::resolve(Viewport::new(1920, 1080), 8)).galactic_dust
    }

    #[test]
    fn test_dust_forms_flat_ring() {
        let mut rng = StdRng::seed_from_u64(20);
        let dust = GalacticDust::new(config(), &mut rng);
        assert_eq!(dust.buffer().count(), 150);
        for p in dust.buffer().iter() {
            let planar = (p.x * p.x + p.z * p.z).sqrt();
            assert!(planar >= 30.0 - 0.001 && planar <= 90.0 + 0.001);
            assert!(p.y.abs() <= 4.0);
        }
    }

    #[test]
    fn test_advance_rotates_only_about_y() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut dust = GalacticDust::new(config(), &mut rng);
        let before = dust.buffer().clone();
        dust.advance();
        dust.advance();
        assert_eq!(dust.buffer(), &before);
        assert!((dust.rotation().y - 0.0006).abs() < 1e-6);
        assert_eq!(dust.rotation().x, 0.0);
        assert_eq!(dust.rotation().z, 0.0);
    }
}
