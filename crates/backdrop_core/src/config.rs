//! Per-tier tunables for every system in the galaxy scene
//!
//! [`SceneConfig::for_profile`] is a pure function of the [`DeviceProfile`]:
//! the same profile always yields the same table. Counts never grow when a
//! device is classified as more constrained, and the nebula clouds are dropped
//! entirely on mobile instead of being shrunk.

use std::time::Duration;

use backdrop_math::Vec3;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::device::DeviceProfile;
use crate::error::ConfigValidationError;

/// Closed interval `[min, max]` sampled uniformly
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max)`; a collapsed range returns `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// RGB color, each channel in `[0, 1]` as authored in hex
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    /// Build from a `0xRRGGBB` literal
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Rgb([r, g, b])
    }

    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.0[0], self.0[1], self.0[2], alpha]
    }
}

pub mod palette {
    use super::Rgb;

    pub fn white() -> Rgb { Rgb::from_hex(0xffffff) }
    pub fn sky_blue() -> Rgb { Rgb::from_hex(0x87ceeb) }
    pub fn amber() -> Rgb { Rgb::from_hex(0xfbbf24) }
    pub fn violet() -> Rgb { Rgb::from_hex(0x8b5cf6) }
    pub fn deep_violet() -> Rgb { Rgb::from_hex(0x4c1d95) }
    pub fn pink() -> Rgb { Rgb::from_hex(0xec4899) }
    pub fn deep_pink() -> Rgb { Rgb::from_hex(0xbe185d) }
    pub fn cyan() -> Rgb { Rgb::from_hex(0x06b6d4) }
    pub fn emerald() -> Rgb { Rgb::from_hex(0x10b981) }
    pub fn orange() -> Rgb { Rgb::from_hex(0xf59e0b) }

    /// Colors cycled across floating orbs by index
    pub fn orbs() -> Vec<Rgb> {
        vec![violet(), pink(), cyan(), emerald(), orange()]
    }
}

/// How a point cloud is drawn
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub color: Rgb,
    /// World-space sprite size
    pub size: f32,
    pub opacity: f32,
}

/// Polar-angle sampling used when scattering stars on a spherical shell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarDistribution {
    /// theta and phi both uniform; stars cluster slightly towards the poles
    #[default]
    Parametric,
    /// cos(phi) uniform, giving equal density per unit area
    AreaUniform,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarFieldConfig {
    pub count: usize,
    pub radius: Range,
    pub distribution: StarDistribution,
    /// Angular frequency (rad/s) of the x-tilt oscillation
    pub tilt_frequency: f32,
    /// Peak x-tilt in radians
    pub tilt_amplitude: f32,
    /// Y spin added per gated tick
    pub spin_per_tick: f32,
    pub style: PointStyle,
    pub update_divisor: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarShowerConfig {
    pub count: usize,
    /// Half-extent of the spawn area on x
    pub spawn_half_width: f32,
    /// Half-extent of the spawn area on z
    pub spawn_half_depth: f32,
    /// Heights used for the initial spawn
    pub spawn_band: Range,
    /// Heights a particle is sent back to after crossing the floor
    pub reset_band: Range,
    /// Downward speed per tick (positive magnitude)
    pub fall_speed: Range,
    /// Max horizontal drift per tick on x and z
    pub horizontal_drift: f32,
    pub floor: f32,
    /// Max x/z offset from the original spawn point after a reset
    pub reset_jitter: f32,
    pub style: PointStyle,
    pub update_divisor: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalacticDustConfig {
    pub count: usize,
    pub radius: Range,
    /// Total vertical thickness of the ring
    pub thickness: f32,
    pub spin_per_tick: f32,
    pub style: PointStyle,
    pub update_divisor: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatingOrbsConfig {
    pub count: usize,
    /// Half-extent of the cube base positions are drawn from
    pub spawn_half_extent: f32,
    /// x/y oscillation amplitude
    pub amplitude: f32,
    /// z amplitude as a fraction of `amplitude`
    pub depth_ratio: f32,
    /// Angular speed multiplier on elapsed seconds
    pub speed: Range,
    /// Sphere radius
    pub radius: Range,
    /// Self-rotation per gated tick (x, y)
    pub spin_per_tick: [f32; 2],
    pub palette: Vec<Rgb>,
    /// Glow of each orb in its own color
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub update_divisor: u32,
}

/// One translucent sphere layer
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShellStyle {
    pub radius: f32,
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalaxyCoreConfig {
    pub position: Vec3,
    pub scale: f32,
    pub outer: ShellStyle,
    pub inner: ShellStyle,
    /// Outer shell y spin per gated tick
    pub outer_spin_per_tick: f32,
    /// Angular frequency (rad/s) of the outer shell's x-tilt
    pub tilt_frequency: f32,
    /// Peak outer x-tilt in radians
    pub tilt_amplitude: f32,
    /// Inner shell spin per gated tick (y, z)
    pub inner_spin_per_tick: [f32; 2],
    pub update_divisor: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NebulaConfig {
    pub position: Vec3,
    pub scale: f32,
    pub shell: ShellStyle,
    /// Angular frequency (rad/s) of the x and y wobble
    pub wobble_frequency: [f32; 2],
    /// Peak x and y wobble in radians
    pub wobble_amplitude: [f32; 2],
    pub update_divisor: u32,
}

/// Camera parallax tunables
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraTuning {
    /// Distance from the origin along +z at mount
    pub start_distance: f32,
    pub fov_degrees: f32,
    /// Pointer-to-offset gain
    pub sensitivity: f32,
    /// Fraction of the remaining distance covered per gated tick, in (0, 1]
    pub smoothing: f32,
    pub update_divisor: u32,
}

/// Radial gradient stop: offset in `[0, 1]` and color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Quiet time after the last scroll event before animation resumes
    pub scroll_settle: Duration,
    /// Minimum interval between accepted pointer samples
    pub pointer_throttle: Duration,
    /// Upper bound on the device pixel ratio used for the surface
    pub max_pixel_ratio: f32,
    pub antialias: bool,
}

/// Complete per-tier table for a mount
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub star_field: StarFieldConfig,
    pub background_stars: StarFieldConfig,
    pub star_shower: StarShowerConfig,
    pub galactic_dust: GalacticDustConfig,
    pub orbs: FloatingOrbsConfig,
    pub galaxy_core: GalaxyCoreConfig,
    /// Empty below the desktop threshold
    pub nebulae: Vec<NebulaConfig>,
    pub camera: CameraTuning,
    pub performance: PerformanceConfig,
    pub background: Vec<GradientStop>,
}

/// Pick a value by (low-end, mobile)
fn by_tier<T>(profile: &DeviceProfile, desktop: T, desktop_low: T, mobile: T, mobile_low: T) -> T {
    match (profile.is_low_end, profile.is_mobile) {
        (false, false) => desktop,
        (true, false) => desktop_low,
        (false, true) => mobile,
        (true, true) => mobile_low,
    }
}

impl SceneConfig {
    /// Derive the table for a device profile
    pub fn for_profile(profile: &DeviceProfile) -> Self {
        let mobile = profile.is_mobile;
        let base_divisor = if profile.is_low_end { 3 } else { 1 };
        let pick = |desktop: f32, phone: f32| if mobile { phone } else { desktop };

        let star_count = by_tier(profile, 600, 400, 300, 200);

        let star_field = StarFieldConfig {
            count: star_count,
            radius: Range::new(20.0, 60.0),
            distribution: StarDistribution::Parametric,
            tilt_frequency: 0.015,
            tilt_amplitude: 0.02,
            spin_per_tick: 0.0008,
            style: PointStyle {
                color: palette::white(),
                size: pick(0.6, 0.4),
                opacity: 0.7,
            },
            update_divisor: base_divisor,
        };

        let background_stars = StarFieldConfig {
            count: star_count / 2,
            radius: Range::new(80.0, 120.0),
            distribution: StarDistribution::AreaUniform,
            tilt_frequency: 0.0,
            tilt_amplitude: 0.0,
            spin_per_tick: 0.0008 * 0.03,
            style: PointStyle {
                color: palette::white(),
                size: pick(0.9, 0.7),
                opacity: 0.45,
            },
            update_divisor: base_divisor,
        };

        let star_shower = StarShowerConfig {
            count: by_tier(profile, 35, 25, 20, 15),
            spawn_half_width: 40.0,
            spawn_half_depth: 20.0,
            spawn_band: Range::new(40.0, 65.0),
            reset_band: Range::new(40.0, 60.0),
            fall_speed: Range::new(0.08, 0.12),
            horizontal_drift: 0.0075,
            floor: -40.0,
            reset_jitter: 7.5,
            style: PointStyle {
                color: palette::sky_blue(),
                size: pick(1.4, 1.0),
                opacity: 0.8,
            },
            update_divisor: base_divisor,
        };

        let galactic_dust = GalacticDustConfig {
            count: by_tier(profile, 150, 100, 80, 50),
            radius: Range::new(30.0, 90.0),
            thickness: 8.0,
            spin_per_tick: 0.0003,
            style: PointStyle {
                color: palette::amber(),
                size: pick(0.35, 0.25),
                opacity: 0.35,
            },
            update_divisor: base_divisor * 3,
        };

        let orbs = FloatingOrbsConfig {
            count: by_tier(profile, 5, 3, 3, 2),
            spawn_half_extent: 25.0,
            amplitude: 1.5,
            depth_ratio: 0.4,
            speed: Range::new(0.03, 0.1),
            radius: Range::new(0.15, 0.45),
            spin_per_tick: [0.002, 0.003],
            palette: palette::orbs(),
            emissive_intensity: 0.25,
            opacity: 0.6,
            update_divisor: base_divisor * 2,
        };

        let galaxy_core = GalaxyCoreConfig {
            position: Vec3::new(0.0, 0.0, -12.0),
            scale: pick(0.9, 0.7),
            outer: ShellStyle {
                radius: 3.0,
                color: palette::violet(),
                emissive: palette::deep_violet(),
                emissive_intensity: 0.25,
                opacity: 0.18,
            },
            inner: ShellStyle {
                radius: 1.5,
                color: palette::pink(),
                emissive: palette::deep_pink(),
                emissive_intensity: 0.4,
                opacity: 0.35,
            },
            outer_spin_per_tick: 0.0015,
            tilt_frequency: 0.08,
            tilt_amplitude: 0.03,
            inner_spin_per_tick: [-0.002, 0.0008],
            update_divisor: base_divisor,
        };

        let nebulae = if mobile {
            Vec::new()
        } else {
            [
                (Vec3::new(-15.0, 10.0, -25.0), palette::violet(), 1.2),
                (Vec3::new(20.0, -8.0, -30.0), palette::pink(), 1.0),
                (Vec3::new(0.0, 15.0, -35.0), palette::cyan(), 1.4),
            ]
            .into_iter()
            .map(|(position, color, scale)| NebulaConfig {
                position,
                scale: scale * 0.8,
                shell: ShellStyle {
                    radius: 2.5,
                    color,
                    emissive: color,
                    emissive_intensity: 0.1,
                    opacity: 0.12,
                },
                wobble_frequency: [0.03, 0.02],
                wobble_amplitude: [0.015, 0.03],
                update_divisor: base_divisor * 2,
            })
            .collect()
        };

        let camera = CameraTuning {
            start_distance: pick(6.0, 10.0),
            fov_degrees: pick(70.0, 65.0),
            sensitivity: pick(0.3, 0.2),
            smoothing: 0.003,
            update_divisor: base_divisor,
        };

        let performance = PerformanceConfig {
            scroll_settle: Duration::from_millis(if mobile { 200 } else { 100 }),
            pointer_throttle: Duration::from_millis(100),
            max_pixel_ratio: pick(1.5, 1.0),
            antialias: !mobile,
        };

        let background = if mobile {
            vec![
                GradientStop { offset: 0.0, color: Rgb::from_hex(0x1a1a2e) },
                GradientStop { offset: 0.6, color: Rgb::from_hex(0x0f0f23) },
                GradientStop { offset: 1.0, color: Rgb::from_hex(0x000000) },
            ]
        } else {
            vec![
                GradientStop { offset: 0.0, color: Rgb::from_hex(0x1a1a2e) },
                GradientStop { offset: 0.3, color: Rgb::from_hex(0x16213e) },
                GradientStop { offset: 0.7, color: Rgb::from_hex(0x0f0f23) },
                GradientStop { offset: 1.0, color: Rgb::from_hex(0x000000) },
            ]
        };

        Self {
            star_field,
            background_stars,
            star_shower,
            galactic_dust,
            orbs,
            galaxy_core,
            nebulae,
            camera,
            performance,
            background,
        }
    }

    /// Builder: choose the polar sampling used for the main star shell
    pub fn with_star_distribution(mut self, distribution: StarDistribution) -> Self {
        self.star_field.distribution = distribution;
        self
    }

    /// Check every invariant the systems rely on
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let divisors = [
            ("star_field", self.star_field.update_divisor),
            ("background_stars", self.background_stars.update_divisor),
            ("star_shower", self.star_shower.update_divisor),
            ("galactic_dust", self.galactic_dust.update_divisor),
            ("orbs", self.orbs.update_divisor),
            ("galaxy_core", self.galaxy_core.update_divisor),
            ("camera", self.camera.update_divisor),
        ];
        for (field, divisor) in divisors {
            if divisor == 0 {
                return Err(ConfigValidationError::ZeroDivisor(field));
            }
        }
        if self.nebulae.iter().any(|n| n.update_divisor == 0) {
            return Err(ConfigValidationError::ZeroDivisor("nebulae"));
        }

        let ranges = [
            ("star_field.radius", self.star_field.radius),
            ("background_stars.radius", self.background_stars.radius),
            ("star_shower.spawn_band", self.star_shower.spawn_band),
            ("star_shower.reset_band", self.star_shower.reset_band),
            ("star_shower.fall_speed", self.star_shower.fall_speed),
            ("galactic_dust.radius", self.galactic_dust.radius),
            ("orbs.speed", self.orbs.speed),
            ("orbs.radius", self.orbs.radius),
        ];
        for (field, range) in ranges {
            if !range.is_valid() {
                return Err(ConfigValidationError::InvertedRange(field));
            }
        }

        // Particles must fall; a reset band below the floor would reset forever
        if self.star_shower.fall_speed.min <= 0.0 {
            return Err(ConfigValidationError::OutOfRange {
                field: "star_shower.fall_speed",
                value: self.star_shower.fall_speed.min,
            });
        }
        if self.star_shower.reset_band.min <= self.star_shower.floor {
            return Err(ConfigValidationError::OutOfRange {
                field: "star_shower.reset_band",
                value: self.star_shower.reset_band.min,
            });
        }

        let smoothing = self.camera.smoothing;
        if !smoothing.is_finite() {
            return Err(ConfigValidationError::NonFinite("camera.smoothing"));
        }
        if smoothing <= 0.0 || smoothing > 1.0 {
            return Err(ConfigValidationError::OutOfRange { field: "camera.smoothing", value: smoothing });
        }
        if !self.camera.sensitivity.is_finite() {
            return Err(ConfigValidationError::NonFinite("camera.sensitivity"));
        }
        if !(self.performance.max_pixel_ratio >= 1.0) {
            return Err(ConfigValidationError::OutOfRange {
                field: "performance.max_pixel_ratio",
                value: self.performance.max_pixel_ratio,
            });
        }
        if self.orbs.palette.is_empty() {
            return Err(ConfigValidationError::OutOfRange { field: "orbs.palette", value: 0.0 });
        }

        Ok(())
    }
}
