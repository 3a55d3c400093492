//! 4x4 Matrix utilities
//!
//! Column-major matrices (`m[column][row]`) matching WGSL's `mat4x4<f32>`
//! layout, plus the projection and view helpers the renderer needs.

use crate::{Euler, Vec3};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a rotation matrix in the plane spanned by axes `p1` and `p2`
/// (0=X, 1=Y, 2=Z). Rotates `p1` towards `p2`.
pub fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let (sn, cs) = angle.sin_cos();

    let mut m = IDENTITY;
    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

/// Rotation about the X axis (right-handed)
pub fn rotation_x(angle: f32) -> Mat4 {
    plane_rotation(angle, 1, 2)
}

/// Rotation about the Y axis (right-handed)
pub fn rotation_y(angle: f32) -> Mat4 {
    plane_rotation(angle, 2, 0)
}

/// Rotation about the Z axis (right-handed)
pub fn rotation_z(angle: f32) -> Mat4 {
    plane_rotation(angle, 0, 1)
}

/// Translation matrix
pub fn translation(t: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = t.x;
    m[3][1] = t.y;
    m[3][2] = t.z;
    m
}

/// Uniform scale matrix
pub fn scale(s: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = s;
    m[1][1] = s;
    m[2][2] = s;
    m
}

/// Model matrix: translate * rotate * scale
pub fn model(position: Vec3, rotation: Euler, uniform_scale: f32) -> Mat4 {
    mul(translation(position), mul(rotation.to_matrix(), scale(uniform_scale)))
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point (w = 1) by a 4x4 matrix
pub fn transform_point(m: Mat4, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0],
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1],
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2],
    )
}

/// Right-handed perspective projection with a `[0, 1]` depth range (wgpu clip space)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(transform_point(IDENTITY, v), v));
    }

    #[test]
    fn test_rotation_y_matches_vec_rotate_y() {
        let v = Vec3::new(1.5, -2.0, 0.25);
        let by_matrix = transform_point(rotation_y(0.9), v);
        assert!(vec_approx_eq(by_matrix, v.rotate_y(0.9)), "got {:?}", by_matrix);
    }

    #[test]
    fn test_rotation_x_turns_y_into_z() {
        let r = transform_point(rotation_x(std::f32::consts::FRAC_PI_2), Vec3::Y);
        assert!(vec_approx_eq(r, Vec3::Z), "Y should become Z, got {:?}", r);
    }

    #[test]
    fn test_model_applies_scale_then_translation() {
        let m = model(Vec3::new(0.0, 0.0, -12.0), Euler::IDENTITY, 2.0);
        let p = transform_point(m, Vec3::new(1.0, 0.0, 0.0));
        assert!(vec_approx_eq(p, Vec3::new(2.0, 0.0, -12.0)));
    }

    #[test]
    fn test_look_at_puts_target_on_negative_z() {
        let view = look_at(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO, Vec3::Y);
        let p = transform_point(view, Vec3::ZERO);
        assert!(vec_approx_eq(p, Vec3::new(0.0, 0.0, -6.0)), "got {:?}", p);
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = perspective(70f32.to_radians(), 1.5, 0.1, 200.0);
        // Point on the near plane maps to depth 0, far plane to depth 1
        let near_z = proj[2][2] * -0.1 + proj[3][2];
        let near_w = proj[2][3] * -0.1;
        assert!((near_z / near_w).abs() < EPSILON);
        let far_z = proj[2][2] * -200.0 + proj[3][2];
        let far_w = proj[2][3] * -200.0;
        assert!((far_z / far_w - 1.0).abs() < EPSILON);
    }
}
