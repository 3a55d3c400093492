//! Euler rotation applied in X, then Y, then Z order

use serde::{Serialize, Deserialize};

use crate::mat4::{self, Mat4};

/// Rotation angles in radians about the X, Y and Z axes
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotation matrix equivalent to `Rz * Ry * Rx`
    pub fn to_matrix(self) -> Mat4 {
        let rx = mat4::rotation_x(self.x);
        let ry = mat4::rotation_y(self.y);
        let rz = mat4::rotation_z(self.z);
        mat4::mul(rz, mat4::mul(ry, rx))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Wrap an accumulating angle into `[0, TAU)` so long sessions keep full precision
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}
