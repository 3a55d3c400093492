//! GPU-compatible data types for the backdrop pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use backdrop_core::config::{GradientStop, PointStyle, ShellStyle};
use backdrop_math::{mat4, Mat4};
use bytemuck::{Pod, Zeroable};

/// Gradient stops beyond this many are dropped
pub const MAX_GRADIENT_STOPS: usize = 4;

/// Mesh vertex for the shared sphere
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// View and projection shared by every draw in a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameMatrices {
    pub view: Mat4,
    pub projection: Mat4,
}

/// Per-cloud uniforms for point sprites
/// Layout: 224 bytes (must match points.wgsl PointUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PointUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub model: Mat4,
    /// RGB + opacity
    pub color: [f32; 4],
    /// World-space sprite width
    pub size: f32,
    pub _padding: [f32; 3],
}

impl PointUniforms {
    pub fn new(frame: &FrameMatrices, model: Mat4, style: &PointStyle) -> Self {
        Self {
            view: frame.view,
            projection: frame.projection,
            model,
            color: style.color.with_alpha(style.opacity),
            size: style.size,
            _padding: [0.0; 3],
        }
    }
}

impl Default for PointUniforms {
    fn default() -> Self {
        Self {
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
            model: mat4::IDENTITY,
            color: [1.0; 4],
            size: 1.0,
            _padding: [0.0; 3],
        }
    }
}

/// Per-object uniforms for translucent spheres
/// Layout: 224 bytes (must match sphere.wgsl SphereUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SphereUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub model: Mat4,
    /// Base RGB + opacity
    pub color: [f32; 4],
    /// Emissive RGB + intensity
    pub emissive: [f32; 4],
}

impl SphereUniforms {
    pub fn new(frame: &FrameMatrices, model: Mat4, shell: &ShellStyle) -> Self {
        Self {
            view: frame.view,
            projection: frame.projection,
            model,
            color: shell.color.with_alpha(shell.opacity),
            emissive: shell.emissive.with_alpha(shell.emissive_intensity),
        }
    }
}

impl Default for SphereUniforms {
    fn default() -> Self {
        Self {
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
            model: mat4::IDENTITY,
            color: [1.0; 4],
            emissive: [0.0; 4],
        }
    }
}

/// Radial background gradient
/// Layout: 96 bytes (must match gradient.wgsl GradientUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GradientUniforms {
    pub colors: [[f32; 4]; MAX_GRADIENT_STOPS],
    pub offsets: [f32; MAX_GRADIENT_STOPS],
    pub stop_count: u32,
    pub _padding: [u32; 3],
}

impl GradientUniforms {
    /// Pack up to [`MAX_GRADIENT_STOPS`] stops; offsets are clamped to `[0, 1]`
    pub fn from_stops(stops: &[GradientStop]) -> Self {
        let mut uniforms = Self::default();
        for (i, stop) in stops.iter().take(MAX_GRADIENT_STOPS).enumerate() {
            uniforms.colors[i] = stop.color.with_alpha(1.0);
            uniforms.offsets[i] = stop.offset.clamp(0.0, 1.0);
            uniforms.stop_count += 1;
        }
        uniforms
    }
}
