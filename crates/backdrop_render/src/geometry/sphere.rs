//! UV sphere shared by every spherical object in the scene

use std::f32::consts::{PI, TAU};

use crate::pipeline::types::SphereVertex;

/// Unit-radius UV sphere; objects scale it through their model matrix
pub struct SphereMesh {
    pub vertices: Vec<SphereVertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Build a sphere with `segments` slices around the equator and `rings` from pole to pole
    ///
    /// Both counts are raised to a minimum of 3 and 2 respectively.
    pub fn uv(segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
        for ring in 0..=rings {
            let theta = ring as f32 / rings as f32 * PI;
            let (sin_theta, cos_theta) = theta.sin_cos();
            for segment in 0..=segments {
                let phi = segment as f32 / segments as f32 * TAU;
                let (sin_phi, cos_phi) = phi.sin_cos();
                let p = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
                vertices.push(SphereVertex {
                    position: p,
                    normal: p,
                });
            }
        }

        // Counter-clockwise when seen from outside
        let stride = segments + 1;
        let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
        for ring in 0..rings {
            for segment in 0..segments {
                let a = ring * stride + segment;
                let b = a + stride;
                let c = b + 1;
                let d = a + 1;
                indices.extend_from_slice(&[a, d, b, b, d, c]);
            }
        }

        Self { vertices, indices }
    }

    /// Coarser mesh for constrained devices
    pub fn for_tier(is_mobile: bool) -> Self {
        if is_mobile {
            Self::uv(16, 12)
        } else {
            Self::uv(32, 24)
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_math::Vec3;

    #[test]
    fn test_counts() {
        let mesh = SphereMesh::uv(8, 4);
        assert_eq!(mesh.vertices.len(), 9 * 5);
        assert_eq!(mesh.indices.len(), 8 * 4 * 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let mesh = SphereMesh::uv(12, 8);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert_eq!(v.position, v.normal);
        }
    }

    #[test]
    fn test_triangles_face_outward() {
        let mesh = SphereMesh::uv(16, 12);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) * (1.0 / 3.0);
            // Pole triangles collapse to zero area
            assert!(normal.dot(centroid) >= -1e-6);
        }
    }

    #[test]
    fn test_minimum_resolution() {
        let mesh = SphereMesh::uv(0, 0);
        assert_eq!(mesh.vertices.len(), 4 * 3);
    }
}
