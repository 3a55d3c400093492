//! A handful of glowing spheres bobbing around fixed anchor points

use backdrop_math::{wrap_angle, Euler, Vec3};
use rand::Rng;

use super::ParticleBuffer;
use crate::config::{FloatingOrbsConfig, Rgb, ShellStyle};
use crate::gate::FrameTime;

/// One orb; each is drawn as its own sphere, not as a point
#[derive(Clone, Debug, PartialEq)]
pub struct Orb {
    pub anchor: Vec3,
    pub color: Rgb,
    pub radius: f32,
    pub speed: f32,
    pub rotation: Euler,
}

impl Orb {
    /// Sphere style for this orb: glowing in its own color
    pub fn shell(&self, config: &FloatingOrbsConfig) -> ShellStyle {
        ShellStyle {
            radius: self.radius,
            color: self.color,
            emissive: self.color,
            emissive_intensity: config.emissive_intensity,
            opacity: config.opacity,
        }
    }
}

pub struct FloatingOrbs {
    config: FloatingOrbsConfig,
    orbs: Vec<Orb>,
    /// Current orb centres, mirrored from the orbit law each gated tick
    positions: ParticleBuffer,
}

impl FloatingOrbs {
    pub fn new<R: Rng + ?Sized>(config: FloatingOrbsConfig, rng: &mut R) -> Self {
        let mut orbs = Self {
            positions: ParticleBuffer::new(config.count),
            orbs: Vec::with_capacity(config.count),
            config,
        };
        orbs.reset(rng);
        orbs
    }

    pub fn config(&self) -> &FloatingOrbsConfig {
        &self.config
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.positions
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let c = &self.config;
        self.orbs.clear();
        for i in 0..c.count {
            let half = c.spawn_half_extent;
            let anchor = Vec3::new(
                (rng.random::<f32>() - 0.5) * 2.0 * half,
                (rng.random::<f32>() - 0.5) * 2.0 * half,
                (rng.random::<f32>() - 0.5) * 2.0 * half,
            );
            self.orbs.push(Orb {
                anchor,
                color: c.palette[i % c.palette.len()],
                radius: c.radius.sample(rng),
                speed: c.speed.sample(rng),
                rotation: Euler::IDENTITY,
            });
            self.positions.set(i, anchor);
        }
    }

    /// Move every orb along its phase-shifted orbit and spin it
    pub fn advance(&mut self, time: &FrameTime) {
        let amplitude = self.config.amplitude;
        let depth = amplitude * self.config.depth_ratio;
        let [spin_x, spin_y] = self.config.spin_per_tick;

        for (i, orb) in self.orbs.iter_mut().enumerate() {
            let phase = i as f32;
            let t = time.elapsed * orb.speed;
            let position = Vec3::new(
                orb.anchor.x + (t + phase).sin() * amplitude,
                orb.anchor.y + (t + phase).cos() * amplitude,
                orb.anchor.z + (t * 0.3 + phase).sin() * depth,
            );
            self.positions.set(i, position);
            orb.rotation.x = wrap_angle(orb.rotation.x + spin_x);
            orb.rotation.y = wrap_angle(orb.rotation.y + spin_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::device::{DeviceProfile, Viewport};
    use rand::{rngs::StdRng, SeedableRng};

    fn config() -> FloatingOrbsConfig {
        SceneConfig::for_profile(&DeviceProfile::resolve(Viewport::new(1920, 1080), 8)).orbs
    }

    #[test]
    fn test_palette_cycles_by_index() {
        let mut rng = StdRng::seed_from_u64(30);
        let orbs = FloatingOrbs::new(config(), &mut rng);
        assert_eq!(orbs.orbs().len(), 5);
        assert_eq!(orbs.buffer().len(), 15);
        for (i, orb) in orbs.orbs().iter().enumerate() {
            assert_eq!(orb.color, config().palette[i % 5]);
            assert!(config().radius.contains(orb.radius));
        }
    }

    #[test]
    fn test_orbs_stay_within_orbit_of_anchor() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut orbs = FloatingOrbs::new(config(), &mut rng);
        for tick in 0..2_000 {
            orbs.advance(&FrameTime { elapsed: tick as f32 / 30.0, dt: 1.0 / 30.0 });
            for (i, orb) in orbs.orbs().iter().enumerate() {
                let offset = orbs.buffer().get(i) - orb.anchor;
                assert!(offset.x.abs() <= 1.5 + 1e-4);
                assert!(offset.y.abs() <= 1.5 + 1e-4);
                assert!(offset.z.abs() <= 0.6 + 1e-4);
            }
        }
        assert!(orbs.buffer().is_finite());
    }

    #[test]
    fn test_orbit_phase_shifted_by_index() {
        let mut rng = StdRng::seed_from_u64(32);
        let mut orbs = FloatingOrbs::new(config(), &mut rng);
        orbs.advance(&FrameTime { elapsed: 0.0, dt: 0.0 });
        let first = orbs.buffer().get(0) - orbs.orbs()[0].anchor;
        let second = orbs.buffer().get(1) - orbs.orbs()[1].anchor;
        assert!((first.y - 1.5).abs() < 1e-4, "cos(0) offset expected");
        assert!((second.x - 1.0f32.sin() * 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_self_rotation_accumulates() {
        let mut rng = StdRng::seed_from_u64(33);
        let mut orbs = FloatingOrbs::new(config(), &mut rng);
        orbs.advance(&FrameTime::default());
        orbs.advance(&FrameTime::default());
        let r = orbs.orbs()[0].rotation;
        assert!((r.x - 0.004).abs() < 1e-6);
        assert!((r.y - 0.006).abs() < 1e-6);
    }

    #[test]
    fn test_orb_shell_glows_in_own_color() {
        let mut rng = StdRng::seed_from_u64(34);
        let orbs = FloatingOrbs::new(config(), &mut rng);
        let orb = &orbs.orbs()[2];
        let shell = orb.shell(orbs.config());
        assert_eq!(shell.radius, orb.radius);
        assert_eq!(shell.color, orb.color);
        assert_eq!(shell.emissive, orb.color);
        assert_eq!(shell.emissive_intensity, 0.25);
        assert_eq!(shell.opacity, 0.6);
    }
}
