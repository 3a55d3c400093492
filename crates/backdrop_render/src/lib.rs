//! Galaxy backdrop rendering
//!
//! This crate provides the wgpu-based renderer that draws a
//! [`GalaxyScene`](backdrop_core::GalaxyScene) behind everything else.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera3D`] - Perspective camera driven by pointer parallax
//! - [`geometry::SphereMesh`] - Shared UV sphere for every round object
//! - [`pipeline::PointsPipeline`] - Instanced additive point sprites
//! - [`pipeline::SpherePipeline`] - Translucent lit spheres
//! - [`pipeline::GradientPipeline`] - Full-screen radial background
//! - [`surface::RenderSurface`] - `start`/`stop` lifecycle and listener registry

pub mod context;
pub mod camera;
pub mod geometry;
pub mod pipeline;
pub mod surface;

pub use camera::Camera3D;
pub use context::{AdapterKind, RenderContext, SurfaceError};
pub use surface::{
    effective_pixel_ratio, surface_extent, ListenerKey, ListenerKind, ListenerRegistry,
    RenderError, RenderSurface, SurfaceMode, SurfaceOptions,
};
