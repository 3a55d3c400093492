//! Rendering pipeline components
//!
//! Three pipelines draw the backdrop back to front: the radial gradient,
//! translucent spheres, then additive point sprites.

pub mod types;
pub mod gradient_pipeline;
pub mod sphere_pipeline;
pub mod points_pipeline;

// Re-export types
pub use types::{
    FrameMatrices, GradientUniforms, PointUniforms, SphereUniforms, SphereVertex,
    MAX_GRADIENT_STOPS,
};

// Re-export pipelines
pub use gradient_pipeline::GradientPipeline;
pub use sphere_pipeline::{SphereObject, SpherePipeline};
pub use points_pipeline::{PointCloud, PointsPipeline, ADDITIVE_BLENDING};
