//! Perspective camera looking into the backdrop
//!
//! The camera only translates; its orientation is always derived from a
//! look-at target, so there is no rotation state to drift.

use backdrop_input::CameraRig;
use backdrop_math::{mat4, Mat4, Vec3};

pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 6.0), 70.0)
    }
}

impl Camera3D {
    /// Camera at `position` aimed at the origin, with a vertical fov in degrees
    pub fn new(position: Vec3, fov_degrees: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            fov_y: fov_degrees.to_radians(),
            near: 0.1,
            far: 200.0,
        }
    }

    /// Builder: set near and far clip planes
    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov_y, aspect, self.near, self.far)
    }

    /// Unit vector from the camera towards its target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalized()
    }
}

impl CameraRig for Camera3D {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
}
