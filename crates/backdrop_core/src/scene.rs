//! The galaxy scene: every animated system plus the scheduler that drives them
//!
//! [`GalaxyScene`] owns one state struct per system and a [`FrameCounter`]
//! beside each. A tick is dispatched with the gate's decision; only `Run`
//! ticks touch state, and each system advances only when its counter wraps.

use backdrop_math::Vec3;
use rand::{rngs::StdRng, SeedableRng};

use crate::config::SceneConfig;
use crate::device::DeviceProfile;
use crate::gate::{FrameCounter, FrameTime, GateDecision, SystemMask, TickReport};
use crate::objects::{GalaxyCore, NebulaCloud};
use crate::particles::{FloatingOrbs, GalacticDust, ParticleSystem, StarField, StarShower};

/// Largest step fed to time-based motion, so a long stall does not jump
const MAX_TICK_DT: f32 = 0.25;

struct Scheduled {
    mask: SystemMask,
    system: ParticleSystem,
    counter: FrameCounter,
}

pub struct GalaxyScene {
    profile: DeviceProfile,
    config: SceneConfig,
    systems: Vec<Scheduled>,
    core: GalaxyCore,
    core_counter: FrameCounter,
    nebulae: Vec<NebulaCloud>,
    nebula_counter: FrameCounter,
    camera_counter: FrameCounter,
    elapsed: f32,
    rng: StdRng,
}

impl GalaxyScene {
    /// Build the scene for a device, deriving the config table from it
    pub fn new(profile: DeviceProfile, seed: u64) -> Self {
        Self::with_config(profile, SceneConfig::for_profile(&profile), seed)
    }

    /// Build the scene from an explicit config table
    pub fn with_config(profile: DeviceProfile, config: SceneConfig, seed: u64) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid scene config: {:?}", config.validate());

        let mut rng = StdRng::seed_from_u64(seed);
        let scheduled = |mask, system: ParticleSystem| {
            let counter = FrameCounter::new(system.update_divisor());
            Scheduled { mask, system, counter }
        };

        let systems = vec![
            scheduled(
                SystemMask::BACKGROUND_STARS,
                ParticleSystem::StarField(StarField::new(config.background_stars.clone(), &mut rng)),
            ),
            scheduled(
                SystemMask::STAR_FIELD,
                ParticleSystem::StarField(StarField::new(config.star_field.clone(), &mut rng)),
            ),
            scheduled(
                SystemMask::STAR_SHOWER,
                ParticleSystem::StarShower(StarShower::new(config.star_shower.clone(), &mut rng)),
            ),
            scheduled(
                SystemMask::GALACTIC_DUST,
                ParticleSystem::GalacticDust(GalacticDust::new(config.galactic_dust.clone(), &mut rng)),
            ),
            scheduled(
                SystemMask::FLOATING_ORBS,
                ParticleSystem::FloatingOrbs(FloatingOrbs::new(config.orbs.clone(), &mut rng)),
            ),
        ];

        let nebula_divisor = config.nebulae.first().map(|n| n.update_divisor).unwrap_or(1);
        let nebulae: Vec<NebulaCloud> = config.nebulae.iter().cloned().map(NebulaCloud::new).collect();

        log::info!(
            "Galaxy scene for {} ({}x{}): {} stars, {} falling, {} dust, {} orbs, {} nebulae",
            profile.tier(),
            profile.viewport.width,
            profile.viewport.height,
            config.star_field.count,
            config.star_shower.count,
            config.galactic_dust.count,
            config.orbs.count,
            nebulae.len(),
        );

        Self {
            profile,
            core: GalaxyCore::new(config.galaxy_core.clone()),
            core_counter: FrameCounter::new(config.galaxy_core.update_divisor),
            nebulae,
            nebula_counter: FrameCounter::new(nebula_divisor),
            camera_counter: FrameCounter::new(config.camera.update_divisor),
            systems,
            config,
            elapsed: 0.0,
            rng,
        }
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Seconds of unfrozen animation so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Dispatch one display frame
    ///
    /// Frozen and suspended frames return an empty report and leave every
    /// buffer, rotation, counter and the clock untouched.
    pub fn tick(&mut self, decision: GateDecision, dt: f32) -> TickReport {
        if decision != GateDecision::Run {
            return TickReport::default();
        }

        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_TICK_DT) } else { 0.0 };
        self.elapsed += dt;
        let time = FrameTime { elapsed: self.elapsed, dt };
        let mut advanced = SystemMask::empty();

        for entry in &mut self.systems {
            if entry.counter.tick() {
                entry.system.advance(&time, &mut self.rng);
                advanced |= entry.mask;
            }
        }

        if self.core_counter.tick() {
            self.core.advance(&time);
            advanced |= SystemMask::GALAXY_CORE;
        }

        if self.nebula_counter.tick() && !self.nebulae.is_empty() {
            for nebula in &mut self.nebulae {
                nebula.advance(&time);
            }
            advanced |= SystemMask::NEBULAE;
        }

        // The camera itself lives with the renderer; the scene only decides when it moves
        if self.camera_counter.tick() {
            advanced |= SystemMask::CAMERA;
        }

        TickReport { advanced }
    }

    /// Regenerate every system and return counters and clock to zero
    pub fn reset(&mut self) {
        for entry in &mut self.systems {
            entry.system.reset(&mut self.rng);
            entry.counter.reset();
        }
        self.core.reset();
        self.core_counter.reset();
        for nebula in &mut self.nebulae {
            nebula.reset();
        }
        self.nebula_counter.reset();
        self.camera_counter.reset();
        self.elapsed = 0.0;
    }

    pub fn systems(&self) -> impl Iterator<Item = &ParticleSystem> {
        self.systems.iter().map(|s| &s.system)
    }

    /// Look up a particle system by its scheduling bit
    pub fn system(&self, mask: SystemMask) -> Option<&ParticleSystem> {
        self.systems.iter().find(|s| s.mask == mask).map(|s| &s.system)
    }

    pub fn galaxy_core(&self) -> &GalaxyCore {
        &self.core
    }

    pub fn nebulae(&self) -> &[NebulaCloud] {
        &self.nebulae
    }

    pub fn floating_orbs(&self) -> Option<&FloatingOrbs> {
        self.system(SystemMask::FLOATING_ORBS).and_then(|s| s.as_floating_orbs())
    }

    /// Where the camera sits at mount, looking at the origin
    pub fn camera_home(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.config.camera.start_distance)
    }

    /// True when no buffer holds a NaN or infinite coordinate
    pub fn is_finite(&self) -> bool {
        self.systems.iter().all(|s| s.system.buffer().is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Viewport;

    fn desktop_scene() -> GalaxyScene {
        GalaxyScene::new(DeviceProfile::resolve(Viewport::new(1920, 1080), 8), 99)
    }

    fn low_end_scene() -> GalaxyScene {
        GalaxyScene::new(DeviceProfile::resolve(Viewport::new(375, 667), 4), 99)
    }

    #[test]
    fn test_desktop_scene_has_nebulae() {
        let scene = desktop_scene();
        assert_eq!(scene.nebulae().len(), 3);
        assert_eq!(scene.systems().count(), 5);
    }

    #[test]
    fn test_mobile_scene_has_no_nebulae() {
        assert!(low_end_scene().nebulae().is_empty());
    }

    #[test]
    fn test_desktop_run_tick_advances_fast_systems() {
        let mut scene = desktop_scene();
        let report = scene.tick(GateDecision::Run, 1.0 / 60.0);
        assert!(report.advanced.contains(SystemMask::STAR_FIELD | SystemMask::STAR_SHOWER | SystemMask::CAMERA));
        // dust waits three ticks, orbs and nebulae two
        assert!(!report.advanced.contains(SystemMask::GALACTIC_DUST));
        assert!(!report.advanced.contains(SystemMask::FLOATING_ORBS));
        assert!(!report.advanced.contains(SystemMask::NEBULAE));

        let report = scene.tick(GateDecision::Run, 1.0 / 60.0);
        assert!(report.advanced.contains(SystemMask::FLOATING_ORBS | SystemMask::NEBULAE));
        let report = scene.tick(GateDecision::Run, 1.0 / 60.0);
        assert!(report.advanced.contains(SystemMask::GALACTIC_DUST));
    }

    #[test]
    fn test_low_end_divisors_thin_out_updates() {
        let mut scene = low_end_scene();
        let mut shower_updates = 0;
        let mut dust_updates = 0;
        for _ in 0..90 {
            let report = scene.tick(GateDecision::Run, 1.0 / 60.0);
            if report.advanced.contains(SystemMask::STAR_SHOWER) {
                shower_updates += 1;
            }
            if report.advanced.contains(SystemMask::GALACTIC_DUST) {
                dust_updates += 1;
            }
        }
        assert_eq!(shower_updates, 30);
        assert_eq!(dust_updates, 10);
    }

    #[test]
    fn test_frozen_ticks_change_nothing() {
        let mut scene = desktop_scene();
        for _ in 0..7 {
            scene.tick(GateDecision::Run, 0.016);
        }
        let buffers: Vec<_> = scene.systems().map(|s| s.buffer().clone()).collect();
        let rotations: Vec<_> = scene.systems().map(|s| s.rotation()).collect();
        let core = scene.galaxy_core().outer_rotation();
        let elapsed = scene.elapsed();

        for _ in 0..120 {
            assert_eq!(scene.tick(GateDecision::Frozen, 0.016), TickReport::default());
            assert_eq!(scene.tick(GateDecision::Suspended, 0.016), TickReport::default());
        }

        let after: Vec<_> = scene.systems().map(|s| s.buffer().clone()).collect();
        let after_rotations: Vec<_> = scene.systems().map(|s| s.rotation()).collect();
        assert_eq!(buffers, after);
        assert_eq!(rotations, after_rotations);
        assert_eq!(core, scene.galaxy_core().outer_rotation());
        assert_eq!(elapsed, scene.elapsed());
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut scene = desktop_scene();
        scene.tick(GateDecision::Run, 10.0);
        assert_eq!(scene.elapsed(), MAX_TICK_DT);
        scene.tick(GateDecision::Run, f32::NAN);
        scene.tick(GateDecision::Run, -1.0);
        assert_eq!(scene.elapsed(), MAX_TICK_DT);
    }

    #[test]
    fn test_reset_rewinds_clock() {
        let mut scene = desktop_scene();
        for _ in 0..10 {
            scene.tick(GateDecision::Run, 0.02);
        }
        scene.reset();
        assert_eq!(scene.elapsed(), 0.0);
        // After reset the counters line up with a fresh scene again
        let report = scene.tick(GateDecision::Run, 0.02);
        assert!(!report.advanced.contains(SystemMask::GALACTIC_DUST));
    }

    #[test]
    fn test_floating_orbs_lookup() {
        let scene = desktop_scene();
        assert_eq!(scene.floating_orbs().map(|o| o.orbs().len()), Some(5));
        assert_eq!(scene.camera_home(), Vec3::new(0.0, 0.0, 6.0));
    }
}
