//! Mesh geometry

mod sphere;

pub use sphere::SphereMesh;
