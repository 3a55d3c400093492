//! Particle systems
//!
//! Four variants share one capability set: expose their config-derived
//! [`PointStyle`]/divisor, expose a fixed-length [`ParticleBuffer`], `reset`
//! from scratch, and `advance` one gated tick. [`ParticleSystem`] is a closed
//! enum so dispatch is a `match`, never a trait object.

mod buffer;
mod star_field;
mod star_shower;
mod galactic_dust;
mod floating_orbs;

pub use buffer::ParticleBuffer;
pub use star_field::StarField;
pub use star_shower::StarShower;
pub use galactic_dust::GalacticDust;
pub use floating_orbs::{FloatingOrbs, Orb};

use backdrop_math::Euler;
use rand::Rng;

use crate::config::PointStyle;
use crate::gate::FrameTime;

/// Which variant a [`ParticleSystem`] is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemKind {
    StarField,
    StarShower,
    GalacticDust,
    FloatingOrbs,
}

pub enum ParticleSystem {
    StarField(StarField),
    StarShower(StarShower),
    GalacticDust(GalacticDust),
    FloatingOrbs(FloatingOrbs),
}

impl ParticleSystem {
    pub fn kind(&self) -> SystemKind {
        match self {
            ParticleSystem::StarField(_) => SystemKind::StarField,
            ParticleSystem::StarShower(_) => SystemKind::StarShower,
            ParticleSystem::GalacticDust(_) => SystemKind::GalacticDust,
            ParticleSystem::FloatingOrbs(_) => SystemKind::FloatingOrbs,
        }
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        match self {
            ParticleSystem::StarField(s) => s.buffer(),
            ParticleSystem::StarShower(s) => s.buffer(),
            ParticleSystem::GalacticDust(s) => s.buffer(),
            ParticleSystem::FloatingOrbs(s) => s.buffer(),
        }
    }

    /// Configured particle count (the buffer holds `3 *` this many floats)
    pub fn count(&self) -> usize {
        match self {
            ParticleSystem::StarField(s) => s.config().count,
            ParticleSystem::StarShower(s) => s.config().count,
            ParticleSystem::GalacticDust(s) => s.config().count,
            ParticleSystem::FloatingOrbs(s) => s.config().count,
        }
    }

    pub fn update_divisor(&self) -> u32 {
        match self {
            ParticleSystem::StarField(s) => s.config().update_divisor,
            ParticleSystem::StarShower(s) => s.config().update_divisor,
            ParticleSystem::GalacticDust(s) => s.config().update_divisor,
            ParticleSystem::FloatingOrbs(s) => s.config().update_divisor,
        }
    }

    /// Sprite style for point clouds; orbs are drawn as spheres and have none
    pub fn point_style(&self) -> Option<PointStyle> {
        match self {
            ParticleSystem::StarField(s) => Some(s.config().style),
            ParticleSystem::StarShower(s) => Some(s.config().style),
            ParticleSystem::GalacticDust(s) => Some(s.config().style),
            ParticleSystem::FloatingOrbs(_) => None,
        }
    }

    /// Rigid orientation applied to the whole cloud when drawn
    pub fn rotation(&self) -> Euler {
        match self {
            ParticleSystem::StarField(s) => s.rotation(),
            ParticleSystem::GalacticDust(s) => s.rotation(),
            ParticleSystem::StarShower(_) | ParticleSystem::FloatingOrbs(_) => Euler::IDENTITY,
        }
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            ParticleSystem::StarField(s) => s.reset(rng),
            ParticleSystem::StarShower(s) => s.reset(rng),
            ParticleSystem::GalacticDust(s) => s.reset(rng),
            ParticleSystem::FloatingOrbs(s) => s.reset(rng),
        }
    }

    /// Advance one gated tick
    pub fn advance<R: Rng + ?Sized>(&mut self, time: &FrameTime, rng: &mut R) {
        match self {
            ParticleSystem::StarField(s) => s.advance(time),
            ParticleSystem::StarShower(s) => s.advance(rng),
            ParticleSystem::GalacticDust(s) => s.advance(),
            ParticleSystem::FloatingOrbs(s) => s.advance(time),
        }
    }

    pub fn as_floating_orbs(&self) -> Option<&FloatingOrbs> {
        match self {
            ParticleSystem::FloatingOrbs(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::device::{DeviceProfile, Viewport};
    use rand::{rngs::StdRng, SeedableRng};

    fn systems(rng: &mut StdRng) -> Vec<ParticleSystem> {
        let config = SceneConfig::for_profile(&DeviceProfile::resolve(Viewport::new(375, 667), 4));
        vec![
            ParticleSystem::StarField(StarField::new(config.star_field.clone(), rng)),
            ParticleSystem::StarShower(StarShower::new(config.star_shower.clone(), rng)),
            ParticleSystem::GalacticDust(GalacticDust::new(config.galactic_dust.clone(), rng)),
            ParticleSystem::FloatingOrbs(FloatingOrbs::new(config.orbs.clone(), rng)),
        ]
    }

    #[test]
    fn test_buffer_is_three_times_count_through_reset_and_advance() {
        let mut rng = StdRng::seed_from_u64(40);
        for mut system in systems(&mut rng) {
            assert_eq!(system.buffer().len(), 3 * system.count(), "{:?}", system.kind());
            for tick in 0..50 {
                system.advance(&FrameTime { elapsed: tick as f32 * 0.016, dt: 0.016 }, &mut rng);
            }
            assert_eq!(system.buffer().len(), 3 * system.count());
            system.reset(&mut rng);
            assert_eq!(system.buffer().len(), 3 * system.count());
            assert!(system.buffer().is_finite());
        }
    }

    #[test]
    fn test_only_point_clouds_have_point_style() {
        let mut rng = StdRng::seed_from_u64(41);
        let kinds: Vec<(SystemKind, bool)> = systems(&mut rng)
            .iter()
            .map(|s| (s.kind(), s.point_style().is_some()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (SystemKind::StarField, true),
                (SystemKind::StarShower, true),
                (SystemKind::GalacticDust, true),
                (SystemKind::FloatingOrbs, false),
            ]
        );
    }
}
