//! Integration tests for scene-level invariants
//!
//! These exercise the public surface the renderer uses:
//! 1. Device resolution feeds the config table deterministically
//! 2. Particle buffers keep their length through every tick and reset
//! 3. Frozen ticks leave the scene bit-identical
//! 4. Lower tiers never get more work than the desktop tier

use backdrop_core::config::StarDistribution;
use backdrop_core::{
    DeviceProfile, DeviceTier, FrameGate, GalaxyScene, GateDecision, SceneConfig, SystemMask,
    Viewport,
};

fn desktop() -> DeviceProfile {
    DeviceProfile::resolve(Viewport::new(1920, 1080), 8)
}

fn phone() -> DeviceProfile {
    DeviceProfile::resolve(Viewport::new(375, 667), 4)
}

fn all_profiles() -> Vec<DeviceProfile> {
    vec![
        desktop(),
        DeviceProfile::resolve(Viewport::new(1920, 1080), 2),
        DeviceProfile::resolve(Viewport::new(600, 900), 8),
        phone(),
    ]
}

// ==================== Scenarios ====================

#[test]
fn test_desktop_scenario() {
    let profile = desktop();
    assert_eq!(profile.tier(), DeviceTier::Desktop);

    let scene = GalaxyScene::new(profile, 1);
    assert_eq!(scene.config().star_field.count, 600);
    assert_eq!(scene.config().performance.max_pixel_ratio, 1.5);
    assert!(!scene.nebulae().is_empty());
}

#[test]
fn test_phone_scenario() {
    let profile = phone();
    assert_eq!(profile.tier(), DeviceTier::MobileLowEnd);

    let scene = GalaxyScene::new(profile, 1);
    assert_eq!(scene.config().star_field.count, 200);
    assert_eq!(scene.config().performance.max_pixel_ratio, 1.0);
    assert!(scene.nebulae().is_empty());
}

// ==================== Buffer Invariants ====================

#[test]
fn test_buffer_length_holds_through_ticks_and_resets() {
    for profile in all_profiles() {
        let mut scene = GalaxyScene::new(profile, 7);
        for round in 0..3 {
            for _ in 0..500 {
                scene.tick(GateDecision::Run, 1.0 / 60.0);
                for system in scene.systems() {
                    assert_eq!(
                        system.buffer().len(),
                        3 * system.count(),
                        "{:?} on {} in round {}",
                        system.kind(),
                        profile.tier(),
                        round
                    );
                }
            }
            assert!(scene.is_finite());
            scene.reset();
        }
    }
}

#[test]
fn test_area_uniform_distribution_keeps_invariants() {
    let config = SceneConfig::for_profile(&desktop()).with_star_distribution(StarDistribution::AreaUniform);
    let mut scene = GalaxyScene::with_config(desktop(), config, 3);
    for _ in 0..200 {
        scene.tick(GateDecision::Run, 0.016);
    }
    let stars = scene.system(SystemMask::STAR_FIELD).expect("star field should exist");
    assert_eq!(stars.buffer().len(), 1800);
    assert!(scene.is_finite());
}

// ==================== Freeze ====================

#[test]
fn test_scroll_freeze_leaves_scene_identical() {
    let mut scene = GalaxyScene::new(desktop(), 5);
    let mut gate = FrameGate::new();
    for _ in 0..37 {
        scene.tick(gate.evaluate(), 0.016);
    }

    gate.set_scrolling(true);
    let snapshot: Vec<_> = scene.systems().map(|s| (s.buffer().clone(), s.rotation())).collect();
    let nebulae: Vec<_> = scene.nebulae().iter().map(|n| n.rotation()).collect();

    for _ in 0..300 {
        let report = scene.tick(gate.evaluate(), 0.016);
        assert!(report.advanced.is_empty());
    }

    let after: Vec<_> = scene.systems().map(|s| (s.buffer().clone(), s.rotation())).collect();
    let nebulae_after: Vec<_> = scene.nebulae().iter().map(|n| n.rotation()).collect();
    assert_eq!(snapshot, after);
    assert_eq!(nebulae, nebulae_after);

    gate.set_scrolling(false);
    let report = scene.tick(gate.evaluate(), 0.016);
    assert!(report.advanced.contains(SystemMask::STAR_SHOWER));
}

// ==================== Config Table ====================

#[test]
fn test_config_is_a_pure_function_of_the_profile() {
    for profile in all_profiles() {
        assert_eq!(SceneConfig::for_profile(&profile), SceneConfig::for_profile(&profile));
        assert!(SceneConfig::for_profile(&profile).validate().is_ok());
    }
}

#[test]
fn test_same_seed_same_scene() {
    let mut a = GalaxyScene::new(desktop(), 42);
    let mut b = GalaxyScene::new(desktop(), 42);
    for _ in 0..120 {
        assert_eq!(a.tick(GateDecision::Run, 0.016), b.tick(GateDecision::Run, 0.016));
    }
    let a_buffers: Vec<_> = a.systems().map(|s| s.buffer().clone()).collect();
    let b_buffers: Vec<_> = b.systems().map(|s| s.buffer().clone()).collect();
    assert_eq!(a_buffers, b_buffers);
}

#[test]
fn test_counts_never_grow_below_desktop() {
    let top = SceneConfig::for_profile(&desktop());
    let bottom = SceneConfig::for_profile(&phone());

    assert!(bottom.star_field.count <= top.star_field.count);
    assert!(bottom.background_stars.count <= top.background_stars.count);
    assert!(bottom.star_shower.count <= top.star_shower.count);
    assert!(bottom.galactic_dust.count <= top.galactic_dust.count);
    assert!(bottom.orbs.count <= top.orbs.count);
    assert!(bottom.nebulae.len() <= top.nebulae.len());
    assert!(bottom.star_field.update_divisor >= top.star_field.update_divisor);
}
