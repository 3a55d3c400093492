//! 3D Mathematics Library
//!
//! Small, dependency-light math types used by the galaxy backdrop.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Euler`] - XYZ Euler rotation (the order scene objects are animated in)
//! - [`Mat4`] - column-major 4x4 matrix plus projection/view helpers

mod vec3;
mod euler;
pub mod mat4;

pub use vec3::Vec3;
pub use euler::{Euler, wrap_angle};
pub use mat4::Mat4;
