//! Falling stars that respawn above the scene once they pass the floor

use backdrop_math::Vec3;
use rand::Rng;

use super::ParticleBuffer;
use crate::config::StarShowerConfig;

/// Independently moving particles integrated with `position += velocity`
///
/// Velocities are drawn once at creation. A particle that drops below the
/// floor is sent back to the reset band near its original spawn point,
/// reusing its slot, so the shower runs forever without allocating.
pub struct StarShower {
    config: StarShowerConfig,
    positions: ParticleBuffer,
    velocities: ParticleBuffer,
    origins: ParticleBuffer,
}

impl StarShower {
    pub fn new<R: Rng + ?Sized>(config: StarShowerConfig, rng: &mut R) -> Self {
        let count = config.count;
        let mut shower = Self {
            config,
            positions: ParticleBuffer::new(count),
            velocities: ParticleBuffer::new(count),
            origins: ParticleBuffer::new(count),
        };
        shower.reset(rng);
        shower
    }

    pub fn config(&self) -> &StarShowerConfig {
        &self.config
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.positions
    }

    pub fn velocities(&self) -> &ParticleBuffer {
        &self.velocities
    }

    /// Spawn points recorded at the last full reset
    pub fn origins(&self) -> &ParticleBuffer {
        &self.origins
    }

    /// Largest downward distance covered in a single tick
    pub fn max_fall_per_tick(&self) -> f32 {
        self.config.fall_speed.max
    }

    /// Redraw every spawn point and velocity
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let c = &self.config;
        for i in 0..self.positions.count() {
            let spawn = Vec3::new(
                symmetric(rng, c.spawn_half_width),
                c.spawn_band.sample(rng),
                symmetric(rng, c.spawn_half_depth),
            );
            let velocity = Vec3::new(
                symmetric(rng, c.horizontal_drift),
                -c.fall_speed.sample(rng),
                symmetric(rng, c.horizontal_drift),
            );
            self.positions.set(i, spawn);
            self.origins.set(i, spawn);
            self.velocities.set(i, velocity);
        }
    }

    /// Integrate one gated tick and respawn particles that crossed the floor
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in 0..self.positions.count() {
            let position = self.positions.get(i) + self.velocities.get(i);
            if position.y < self.config.floor {
                self.respawn(i, rng);
            } else {
                self.positions.set(i, position);
            }
        }
    }

    fn respawn<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        let origin = self.origins.get(index);
        let jitter = self.config.reset_jitter;
        self.positions.set(
            index,
            Vec3::new(
                origin.x + symmetric(rng, jitter),
                self.config.reset_band.sample(rng),
                origin.z + symmetric(rng, jitter),
            ),
        );
    }
}

/// Uniform sample in `[-half, half)`
fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * half
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::device::{DeviceProfile, Viewport};
    use rand::{rngs::StdRng, SeedableRng};

    fn config() -> StarShowerConfig {
        SceneConfig::for_profile(&DeviceProfile::resolve(Viewport::new(1920, 1080), 8)).star_shower
    }

    #[test]
    fn test_initial_spawn_inside_spawn_volume() {
        let mut rng = StdRng::seed_from_u64(10);
        let shower = StarShower::new(config(), &mut rng);
        let c = shower.config();
        for p in shower.buffer().iter() {
            assert!(p.x.abs() <= c.spawn_half_width);
            assert!(p.z.abs() <= c.spawn_half_depth);
            assert!(c.spawn_band.contains(p.y));
        }
    }

    #[test]
    fn test_velocities_fall_and_drift_slightly() {
        let mut rng = StdRng::seed_from_u64(11);
        let shower = StarShower::new(config(), &mut rng);
        assert_eq!(shower.velocities().len(), shower.buffer().len());
        for v in shower.velocities().iter() {
            assert!(v.y < 0.0);
            assert!(-v.y >= 0.08 && -v.y <= 0.12);
            assert!(v.x.abs() <= 0.0075 && v.z.abs() <= 0.0075);
        }
    }

    #[test]
    fn test_advance_adds_velocity() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut shower = StarShower::new(config(), &mut rng);
        let before = shower.buffer().get(0);
        let velocity = shower.velocities().get(0);
        shower.advance(&mut rng);
        let after = shower.buffer().get(0);
        assert_eq!(after, before + velocity);
    }

    #[test]
    fn test_particle_below_floor_resets_into_band_near_origin() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut shower = StarShower::new(config(), &mut rng);
        let floor = shower.config().floor;
        let origin = shower.origins().get(3);

        shower.positions.set(3, Vec3::new(origin.x + 2.0, floor - 1.0, origin.z - 2.0));
        shower.advance(&mut rng);

        let p = shower.buffer().get(3);
        assert!(shower.config().reset_band.contains(p.y), "y {} outside reset band", p.y);
        assert!((p.x - origin.x).abs() <= 7.5 + 1e-3);
        assert!((p.z - origin.z).abs() <= 7.5 + 1e-3);
    }

    #[test]
    fn test_fall_stays_bounded_forever() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut shower = StarShower::new(config(), &mut rng);
        let lower_bound = shower.config().floor - shower.max_fall_per_tick();
        for _ in 0..20_000 {
            shower.advance(&mut rng);
            assert!(shower.buffer().is_finite());
            assert!(shower.buffer().iter().all(|p| p.y >= lower_bound));
            assert_eq!(shower.buffer().len(), 3 * shower.config().count);
        }
    }

    #[test]
    fn test_reset_keeps_buffer_lengths() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut shower = StarShower::new(config(), &mut rng);
        for _ in 0..100 {
            shower.advance(&mut rng);
        }
        shower.reset(&mut rng);
        assert_eq!(shower.buffer().len(), 105);
        assert_eq!(shower.velocities().len(), 105);
        assert_eq!(shower.origins(), shower.buffer());
    }
}
